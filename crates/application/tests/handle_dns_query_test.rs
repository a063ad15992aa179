mod helpers;

use helpers::{mappings, use_case, MockUpstreamResolver, UpstreamCall, DOMAIN};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use wildns_application::ports::UpstreamAnswer;
use wildns_application::services::{
    AnswerClassifier, FallbackGateway, PatternCompiler, ResolutionEngine,
};
use wildns_application::use_cases::{HandleDnsQueryUseCase, QueryAnswer};
use wildns_domain::{
    AnswerRecord, DnsQuery, DomainError, HostMappings, MappingEntry, RecordType,
    LOCAL_RECORD_TTL,
};

fn upstream_a(name: &str, ip: Ipv4Addr) -> UpstreamAnswer {
    let record = Record::from_rdata(Name::from_str(name).unwrap(), 60, RData::A(A(ip)));
    UpstreamAnswer::new(ResponseCode::NoError).with_answers(vec![record])
}

fn local(answer: QueryAnswer) -> Vec<AnswerRecord> {
    match answer {
        QueryAnswer::Local(records) => records,
        QueryAnswer::Upstream(_) => panic!("expected a local answer"),
    }
}

fn upstream(answer: QueryAnswer) -> UpstreamAnswer {
    match answer {
        QueryAnswer::Upstream(answer) => answer,
        QueryAnswer::Local(records) => panic!("expected an upstream answer, got {:?}", records),
    }
}

// ── address queries ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_wildcard_answer_is_local_and_skips_upstream() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&HostMappings::default(), mock.clone());

    let answer = use_case
        .execute(&DnsQuery::new("app.10.0.0.1.xip.test", RecordType::A), None)
        .await
        .unwrap();

    let records = local(answer);
    assert_eq!(
        records,
        vec![AnswerRecord::Address {
            name: Arc::from("app.10.0.0.1.xip.test"),
            address: Ipv4Addr::new(10, 0, 0, 1),
            ttl: 0,
        }]
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_unmatched_name_falls_back_exactly_once() {
    let mock = Arc::new(MockUpstreamResolver::new());
    mock.set_response("example.com", upstream_a("example.com.", Ipv4Addr::new(93, 184, 216, 34)));
    let use_case = use_case(&mappings(&[("*.svc.local", "10.0.0.5")]), mock.clone());

    let answer = use_case
        .execute(&DnsQuery::new("Example.COM.", RecordType::A), None)
        .await
        .unwrap();

    let answer = upstream(answer);
    assert_eq!(answer.response_code, ResponseCode::NoError);
    assert_eq!(answer.answers.len(), 1);
    assert_eq!(
        mock.calls(),
        vec![UpstreamCall {
            name: "example.com".to_string(),
            record_type: RecordType::A,
            timeout: None,
        }]
    );
}

#[tokio::test]
async fn test_upstream_response_code_is_passed_through() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&HostMappings::default(), mock.clone());

    let answer = use_case
        .execute(&DnsQuery::new("missing.example", RecordType::A), None)
        .await
        .unwrap();

    assert_eq!(upstream(answer).response_code, ResponseCode::NXDomain);
}

#[tokio::test]
async fn test_timeout_is_propagated_to_upstream() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&HostMappings::default(), mock.clone());
    let timeout = Some(Duration::from_millis(750));

    use_case
        .execute(&DnsQuery::new("example.com", RecordType::A), timeout)
        .await
        .unwrap();

    assert_eq!(mock.calls()[0].timeout, timeout);
}

#[tokio::test]
async fn test_mapped_name_answers_address() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&mappings(&[("*.svc.local", "10.0.0.5")]), mock.clone());

    let records = local(
        use_case
            .execute(&DnsQuery::new("DB.svc.local", RecordType::A), None)
            .await
            .unwrap(),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "DB.svc.local");
    assert!(matches!(
        records[0],
        AnswerRecord::Address { address, .. } if address == Ipv4Addr::new(10, 0, 0, 5)
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_chained_mapping_answers_final_address() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(
        &mappings(&[("a.local", "b.local"), ("b.local", "10.0.0.2")]),
        mock.clone(),
    );

    let records = local(
        use_case
            .execute(&DnsQuery::new("a.local", RecordType::A), None)
            .await
            .unwrap(),
    );

    assert!(matches!(
        records[0],
        AnswerRecord::Address { address, .. } if address == Ipv4Addr::new(10, 0, 0, 2)
    ));
}

#[tokio::test]
async fn test_alias_is_answered_locally_without_fallback() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&mappings(&[("cdn.local", "edge.example.net")]), mock.clone());

    let records = local(
        use_case
            .execute(&DnsQuery::new("cdn.local", RecordType::A), None)
            .await
            .unwrap(),
    );

    assert_eq!(
        records,
        vec![AnswerRecord::Alias {
            name: Arc::from("cdn.local"),
            target: Arc::from("edge.example.net"),
            ttl: LOCAL_RECORD_TTL,
        }]
    );
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_alias_forwarding_sends_target_upstream() {
    let mock = Arc::new(MockUpstreamResolver::new());
    mock.set_response(
        "edge.example.net",
        upstream_a("edge.example.net.", Ipv4Addr::new(203, 0, 113, 7)),
    );
    let use_case = use_case(&mappings(&[("cdn.local", "edge.example.net")]), mock.clone())
        .with_alias_forwarding(true);

    let answer = upstream(
        use_case
            .execute(&DnsQuery::new("cdn.local", RecordType::A), None)
            .await
            .unwrap(),
    );

    assert_eq!(answer.answers.len(), 1);
    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "edge.example.net");
    assert_eq!(calls[0].record_type, RecordType::A);
}

#[tokio::test]
async fn test_invalid_wildcard_address_is_empty_local_answer() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&HostMappings::default(), mock.clone());

    let records = local(
        use_case
            .execute(&DnsQuery::new("a.999.1.2.3.xip.test", RecordType::A), None)
            .await
            .unwrap(),
    );

    assert!(records.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_cyclic_mapping_falls_back_to_upstream() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(
        &mappings(&[("x.local", "y.local"), ("y.local", "x.local")]),
        mock.clone(),
    );

    let answer = use_case
        .execute(&DnsQuery::new("x.local", RecordType::A), None)
        .await
        .unwrap();

    assert!(!answer.is_local());
    assert_eq!(mock.calls()[0].name, "x.local");
}

#[tokio::test]
async fn test_upstream_error_is_returned() {
    let mock = Arc::new(MockUpstreamResolver::new());
    mock.set_error("example.com", DomainError::TransportAllServersUnreachable);
    let use_case = use_case(&HostMappings::default(), mock.clone());

    let result = use_case
        .execute(&DnsQuery::new("example.com", RecordType::A), None)
        .await;

    assert!(matches!(
        result,
        Err(DomainError::TransportAllServersUnreachable)
    ));
}

// ── nameserver queries ─────────────────────────────────────────────────────

fn ns_use_case(mock: Arc<MockUpstreamResolver>) -> HandleDnsQueryUseCase {
    let source = HostMappings::new(
        vec![MappingEntry::new("*.svc.local", "10.0.0.5")],
        vec!["ns1.xip.test".to_string(), "ns2.xip.test".to_string()],
    );
    let compiler = PatternCompiler::default();
    let engine = ResolutionEngine::new(
        compiler.compile_wildcard(DOMAIN).unwrap(),
        compiler.compile_mapping(&source).unwrap(),
    );
    HandleDnsQueryUseCase::new(
        Arc::new(engine),
        AnswerClassifier::default(),
        FallbackGateway::new(mock),
    )
}

#[tokio::test]
async fn test_ns_for_wildcard_domain_is_local() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = ns_use_case(mock.clone());

    let records = local(
        use_case
            .execute(&DnsQuery::new("xip.test.", RecordType::NS), None)
            .await
            .unwrap(),
    );

    assert_eq!(records.len(), 2);
    let hosts: Vec<&str> = records
        .iter()
        .map(|r| match r {
            AnswerRecord::Nameserver { host, ttl, .. } => {
                assert_eq!(*ttl, LOCAL_RECORD_TTL);
                &**host
            }
            other => panic!("unexpected record {:?}", other),
        })
        .collect();
    assert_eq!(hosts, vec!["ns1.xip.test", "ns2.xip.test"]);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_local_answers_keep_query_spelling() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = ns_use_case(mock.clone());

    let address = local(
        use_case
            .execute(&DnsQuery::new("App.10.0.0.1.XIP.test.", RecordType::A), None)
            .await
            .unwrap(),
    );
    let nameservers = local(
        use_case
            .execute(&DnsQuery::new("XIP.Test.", RecordType::NS), None)
            .await
            .unwrap(),
    );

    assert_eq!(address[0].name(), "App.10.0.0.1.XIP.test");
    assert!(nameservers.iter().all(|r| r.name() == "XIP.Test"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_ns_for_other_domain_falls_back() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = ns_use_case(mock.clone());

    let answer = use_case
        .execute(&DnsQuery::new("other.com", RecordType::NS), None)
        .await
        .unwrap();

    assert!(!answer.is_local());
    assert_eq!(
        mock.calls(),
        vec![UpstreamCall {
            name: "other.com".to_string(),
            record_type: RecordType::NS,
            timeout: None,
        }]
    );
}

#[tokio::test]
async fn test_ns_without_ns_entry_falls_back() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&HostMappings::default(), mock.clone());

    use_case
        .execute(&DnsQuery::new(DOMAIN, RecordType::NS), None)
        .await
        .unwrap();

    assert_eq!(mock.call_count(), 1);
}

// ── other record types ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_other_types_go_straight_upstream() {
    let mock = Arc::new(MockUpstreamResolver::new());
    let use_case = use_case(&mappings(&[("*", "10.0.0.1")]), mock.clone());

    for record_type in [RecordType::AAAA, RecordType::MX, RecordType::Unknown(65280)] {
        let answer = use_case
            .execute(&DnsQuery::new("app.10.0.0.1.xip.test", record_type), None)
            .await
            .unwrap();
        assert!(!answer.is_local());
    }

    let types: Vec<RecordType> = mock.calls().iter().map(|c| c.record_type).collect();
    assert_eq!(
        types,
        vec![RecordType::AAAA, RecordType::MX, RecordType::Unknown(65280)]
    );
}
