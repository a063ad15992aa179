use crate::dns::answer_records;
use crate::dns::forwarding::RecordTypeMapper;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use wildns_application::use_cases::{HandleDnsQueryUseCase, QueryAnswer};
use wildns_domain::DnsQuery;

/// Glue between hickory's server loop and the query use case.
///
/// Fallback queries carry no timeout of their own, so the forwarder's
/// configured default applies.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = request_info.query;
        let name = query.name().to_string();
        let record_type = RecordTypeMapper::from_hickory(query.query_type());

        info!(
            domain = %name,
            record_type = %record_type,
            client = %request.src().ip(),
            protocol = %request.protocol(),
            "DNS query received"
        );

        let dns_query = DnsQuery::new(&name, record_type);

        let answer = match self.use_case.execute(&dns_query, None).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(domain = %dns_query.domain, error = %e, "Query resolution failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        match answer {
            QueryAnswer::Local(answers) => {
                let records = match answer_records::to_records(&answers) {
                    Ok(records) => records,
                    Err(e) => {
                        warn!(domain = %dns_query.domain, error = %e, "Local answer not renderable, answering empty");
                        return send_response(
                            request,
                            &mut response_handle,
                            ResponseCode::NoError,
                            &[],
                            &[],
                            &[],
                        )
                        .await;
                    }
                };
                debug!(domain = %dns_query.domain, answers = records.len(), "Sending local response");
                send_response(
                    request,
                    &mut response_handle,
                    ResponseCode::NoError,
                    &records,
                    &[],
                    &[],
                )
                .await
            }
            QueryAnswer::Upstream(upstream) => {
                debug!(
                    domain = %dns_query.domain,
                    rcode = ?upstream.response_code,
                    answers = upstream.answers.len(),
                    server = upstream.upstream_server.as_deref().unwrap_or("unknown"),
                    "Sending upstream response"
                );
                send_response(
                    request,
                    &mut response_handle,
                    upstream.response_code,
                    &upstream.answers,
                    &upstream.authority,
                    &upstream.additional,
                )
                .await
            }
        }
    }
}

async fn send_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
    answers: &[Record],
    authority: &[Record],
    additional: &[Record],
) -> ResponseInfo {
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(code);
    header.set_recursion_available(true);

    let response = builder.build(header, answers.iter(), authority.iter(), &[], additional.iter());
    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(header)
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    send_response(request, response_handle, code, &[], &[], &[]).await
}
