#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// How the mock upstream replies.
#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// One A record for whatever was asked.
    Answer(Ipv4Addr),
    /// Empty reply with the given code.
    Rcode(ResponseCode),
    /// UDP reply has TC set and no answers; the TCP reply answers.
    TruncatedUdp(Ipv4Addr),
    /// Reply with a transaction ID that does not match.
    WrongId,
    /// Never reply.
    Silent,
}

#[derive(Debug, Clone)]
pub struct ReceivedQuery {
    pub protocol: &'static str,
    pub name: String,
    pub record_type: RecordType,
    pub recursion_desired: bool,
}

/// Loopback upstream listening on UDP (and TCP for truncation tests).
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedQuery>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let tcp = match behavior {
            MockBehavior::TruncatedUdp(_) => Some(TcpListener::bind(addr).await?),
            _ => None,
        };

        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_received = received.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(reply) = respond(&buf[..len], behavior, "UDP", &udp_received) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                }
            }
        });

        if let Some(listener) = tcp {
            let tcp_received = received.clone();
            tokio::spawn(async move {
                while let Ok((mut stream, _)) = listener.accept().await {
                    let mut len_buf = [0u8; 2];
                    if stream.read_exact(&mut len_buf).await.is_err() {
                        continue;
                    }
                    let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                    if stream.read_exact(&mut query).await.is_err() {
                        continue;
                    }
                    if let Some(reply) = respond(&query, behavior, "TCP", &tcp_received) {
                        let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
                        let _ = stream.write_all(&reply).await;
                    }
                }
            });
        }

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<ReceivedQuery> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn respond(
    bytes: &[u8],
    behavior: MockBehavior,
    protocol: &'static str,
    received: &Mutex<Vec<ReceivedQuery>>,
) -> Option<Vec<u8>> {
    let query = Message::from_vec(bytes).ok()?;
    let question = query.queries().first()?.clone();

    received.lock().unwrap().push(ReceivedQuery {
        protocol,
        name: question.name().to_utf8(),
        record_type: question.query_type(),
        recursion_desired: query.recursion_desired(),
    });

    let mut reply = Message::new();
    reply
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true);
    reply.add_query(question.clone());

    let answer = |ip: Ipv4Addr| Record::from_rdata(question.name().clone(), 60, RData::A(A(ip)));

    match behavior {
        MockBehavior::Answer(ip) => {
            reply.add_answer(answer(ip));
        }
        MockBehavior::Rcode(code) => {
            reply.set_response_code(code);
        }
        MockBehavior::TruncatedUdp(ip) => {
            if protocol == "TCP" {
                reply.add_answer(answer(ip));
            } else {
                reply.set_truncated(true);
            }
        }
        MockBehavior::WrongId => {
            reply.set_id(query.id().wrapping_add(1));
        }
        MockBehavior::Silent => return None,
    }

    reply.to_vec().ok()
}
