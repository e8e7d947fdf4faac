//! Outbound RPC dialing. Every call here is a single attempt bounded by
//! `timeout`; a timed-out or failed call is reported as an error and the
//! caller (router / maintenance / client ops) decides the fallback policy.
//! There is deliberately no connection retry loop: the design requires
//! transport failures to be treated as terminal for that call, not masked
//! by blocking retries.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::Request;

use crate::error::{ChordError, ChordResult};
use crate::ring::RingId;

use super::chord_proto::{
    chord_client::ChordClient, Empty, GetFileRequest, NotifyRequest, RingId as RingIdMsg,
    SaveFileRequest,
};

async fn dial(address: &str, timeout: Duration) -> ChordResult<ChordClient<Channel>> {
    let endpoint = Endpoint::from_shared(format!("http://{address}"))
        .map_err(|e| ChordError::Connect { address: address.to_string(), source: e })?
        .connect_timeout(timeout)
        .timeout(timeout);
    let channel = endpoint
        .connect()
        .await
        .map_err(|e| ChordError::Connect { address: address.to_string(), source: e })?;
    Ok(ChordClient::new(channel))
}

async fn call<T, F, Fut>(address: &str, timeout: Duration, f: F) -> ChordResult<T>
where
    F: FnOnce(ChordClient<Channel>) -> Fut,
    Fut: std::future::Future<Output = Result<tonic::Response<T>, tonic::Status>>,
{
    let client = dial(address, timeout).await?;
    match tokio::time::timeout(timeout, f(client)).await {
        Ok(Ok(response)) => Ok(response.into_inner()),
        Ok(Err(status)) => Err(ChordError::Rpc { address: address.to_string(), status }),
        Err(_) => Err(ChordError::Timeout { address: address.to_string() }),
    }
}

/// Outcome of a find-successor RPC: `found` mirrors the wire reply, not a
/// `Result`, because a logical "not found" is not itself a transport error.
pub struct FindSuccessorOutcome {
    pub found: bool,
    pub address: String,
}

pub async fn find_successor(address: &str, id: RingId, timeout: Duration) -> ChordResult<FindSuccessorOutcome> {
    let reply = call(address, timeout, |mut c| async move {
        c.find_successor(Request::new(RingIdMsg { value: id })).await
    })
    .await?;
    Ok(FindSuccessorOutcome { found: reply.found, address: reply.address })
}

pub async fn get_identifier(address: &str, timeout: Duration) -> ChordResult<RingId> {
    let reply = call(address, timeout, |mut c| async move { c.get_identifier(Request::new(Empty {})).await }).await?;
    Ok(reply.id)
}

/// Returns the empty string when the peer has no predecessor.
pub async fn get_predecessor(address: &str, timeout: Duration) -> ChordResult<String> {
    let reply = call(address, timeout, |mut c| async move { c.get_predecessor(Request::new(Empty {})).await }).await?;
    Ok(reply.address)
}

pub async fn notify(address: &str, candidate_address: &str, timeout: Duration) -> ChordResult<()> {
    let candidate_address = candidate_address.to_string();
    call(address, timeout, |mut c| async move {
        c.notify(Request::new(NotifyRequest { candidate_address })).await
    })
    .await?;
    Ok(())
}

pub async fn save_file(
    address: &str,
    id: RingId,
    name: String,
    content: Vec<u8>,
    timeout: Duration,
) -> ChordResult<()> {
    call(address, timeout, |mut c| async move {
        c.save_file(Request::new(SaveFileRequest { id, name, content })).await
    })
    .await?;
    Ok(())
}

pub async fn get_file(address: &str, id: RingId, timeout: Duration) -> ChordResult<(String, Vec<u8>)> {
    let reply = call(address, timeout, |mut c| async move {
        c.get_file(Request::new(GetFileRequest { id })).await
    })
    .await?;
    Ok((reply.name, reply.content))
}

/// Liveness probe: opening the transport connection is the whole check, no
/// application-level RPC is issued.
pub async fn health_probe(address: &str, timeout: Duration) -> ChordResult<()> {
    dial(address, timeout).await.map(|_| ())
}
