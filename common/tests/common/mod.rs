//! Shared fakes for flow and client tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use enrollment_common::error::Result;
use enrollment_common::faucet::{FaucetCoin, FaucetResponse};
use enrollment_common::rpc::{BigInt, Coin, Effects, ExecutionResponse, ExecutionStatus, ObjectInfo, Owner};
use enrollment_common::types::{Digest, ObjectRef};
use enrollment_common::{FaucetApi, FaucetRequest, Fault, Network, ObjectID, Reporter, SuiAddress, SuiRpc};

pub const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 31,
];

/// Wallet file holding `bytes` as a JSON array.
pub fn wallet_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(bytes).unwrap()).unwrap();
    file
}

pub fn capture_reporter() -> Reporter<Vec<u8>, Vec<u8>> {
    Reporter::new(Network::Devnet, Vec::new(), Vec::new())
}

pub fn captured(reporter: Reporter<Vec<u8>, Vec<u8>>) -> (String, String) {
    let (out, err) = reporter.into_inner();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

pub fn coin(id: &str, version: u64) -> Coin {
    Coin {
        coin_type: "0x2::sui::SUI".into(),
        coin_object_id: id.into(),
        version: BigInt::Text(version.to_string()),
        digest: Digest([version as u8; 32]).to_string(),
        balance: BigInt::Number(1_000_000_000),
    }
}

// ─────────────────── Stub faucet ───────────────────

pub enum FaucetBehaviour {
    Objects(Vec<&'static str>),
    Fault(&'static str),
}

pub struct StubFaucet {
    pub behaviour: FaucetBehaviour,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<FaucetRequest>>,
}

impl StubFaucet {
    pub fn new(behaviour: FaucetBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FaucetApi for StubFaucet {
    async fn request_gas(&self, request: &FaucetRequest) -> Result<FaucetResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.behaviour {
            FaucetBehaviour::Objects(ids) => Ok(FaucetResponse {
                transferred_gas_objects: ids
                    .iter()
                    .map(|id| FaucetCoin {
                        id: id.to_string(),
                        amount: Some(1_000_000_000),
                        transfer_tx_digest: None,
                    })
                    .collect(),
                error: None,
            }),
            FaucetBehaviour::Fault(msg) => Err(Fault::Faucet(msg.to_string())),
        }
    }
}

// ─────────────────── Stub fullnode ───────────────────

pub enum ExecuteBehaviour {
    Digest(&'static str),
    RpcError(&'static str),
    Failed(&'static str, &'static str),
}

pub struct StubRpc {
    pub execute: ExecuteBehaviour,
    pub coins: Vec<Coin>,
    pub owner: Option<Owner>,
    pub calls: AtomicUsize,
    pub executed: Mutex<Vec<(String, Vec<String>)>>,
}

impl StubRpc {
    pub fn new(execute: ExecuteBehaviour) -> Self {
        Self {
            execute,
            coins: vec![coin("0xa1", 4), coin("0xa2", 9)],
            owner: Some(Owner::Shared {
                initial_shared_version: 11,
            }),
            calls: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Base64-decoded transaction bytes of the single executed transaction.
    pub fn executed_tx(&self) -> (Vec<u8>, String) {
        let executed = self.executed.lock().unwrap();
        assert_eq!(executed.len(), 1, "expected exactly one execution");
        let (tx, sigs) = &executed[0];
        (base64::decode(tx).unwrap(), sigs[0].clone())
    }
}

#[async_trait]
impl SuiRpc for StubRpc {
    async fn reference_gas_price(&self) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(1000)
    }

    async fn gas_coins(&self, _owner: SuiAddress) -> Result<Vec<Coin>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.coins.clone())
    }

    async fn get_object(&self, id: ObjectID) -> Result<ObjectInfo> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ObjectInfo {
            object_ref: ObjectRef {
                object_id: id,
                version: 12,
                digest: Digest([12u8; 32]),
            },
            owner: self.owner.clone(),
        })
    }

    async fn execute_transaction(&self, tx_bytes: String, signatures: Vec<String>) -> Result<ExecutionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.executed.lock().unwrap().push((tx_bytes, signatures));
        match self.execute {
            ExecuteBehaviour::Digest(digest) => Ok(ExecutionResponse {
                digest: digest.into(),
                effects: Some(Effects {
                    status: ExecutionStatus {
                        status: "success".into(),
                        error: None,
                    },
                }),
            }),
            ExecuteBehaviour::RpcError(msg) => Err(Fault::Rpc {
                code: -32002,
                message: msg.into(),
            }),
            ExecuteBehaviour::Failed(digest, error) => Ok(ExecutionResponse {
                digest: digest.into(),
                effects: Some(Effects {
                    status: ExecutionStatus {
                        status: "failure".into(),
                        error: Some(error.into()),
                    },
                }),
            }),
        }
    }
}

// ─────────────────── Mock HTTP backend ───────────────────

/// Requests seen by a mock backend: `(request line, body)`.
pub type Seen = Arc<Mutex<Vec<(String, String)>>>;

/// Serves every connection with `respond(body) -> (status, body)`.
pub async fn start_programmable_backend<F>(respond: F) -> (String, Seen)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let respond = Arc::new(respond);
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_server = seen.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let respond = respond.clone();
            let seen = seen_by_server.clone();
            tokio::spawn(async move {
                let (line, body) = read_request(&mut socket).await;
                seen.lock().unwrap().push((line, body.clone()));
                let (status, reply) = respond(&body);
                let status_text = match status {
                    200 => "200 OK",
                    400 => "400 Bad Request",
                    429 => "429 Too Many Requests",
                    500 => "500 Internal Server Error",
                    _ => "200 OK",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    reply.len(),
                    reply
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), seen)
}

pub async fn start_mock_backend(status: u16, body: &'static str) -> (String, Seen) {
    start_programmable_backend(move |_| (status, body.to_string())).await
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> (String, String) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return (String::new(), String::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let line = head.lines().next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    (line, body)
}
