//! The RPC surface: a thin `tonic` service that adapts the six wire methods
//! of the design onto the core's inherent [`ChordNode`] methods. Routing,
//! maintenance and handoff logic all live on `ChordNode`; this module only
//! translates proto messages and enforces the "RPC failure becomes a
//! logical not-found / empty reply" boundary described in the design's
//! error-handling section.

pub mod client;

use std::sync::Arc;

use log::debug;
use tonic::{Request, Response, Status};

use crate::node::ChordNode;
use crate::ring::RingId;

pub mod chord_proto {
    tonic::include_proto!("chord");

    pub const FILE_DESCRIPTOR_SET: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/chord_descriptor.bin"));
}

use chord_proto::{
    chord_server::Chord, Empty, FindSuccessorReply, GetFileReply, GetFileRequest,
    IdentifierReply, NotifyRequest, PredecessorReply, RingId as RingIdMsg, SaveFileRequest,
};

pub struct ChordService {
    node: Arc<ChordNode>,
}

impl ChordService {
    pub fn new(node: Arc<ChordNode>) -> Self {
        ChordService { node }
    }
}

#[tonic::async_trait]
impl Chord for ChordService {
    async fn find_successor(
        &self,
        request: Request<RingIdMsg>,
    ) -> Result<Response<FindSuccessorReply>, Status> {
        let request_id: RingId = request.into_inner().value;
        debug!("find_successor({}) received", request_id);
        let reply = match self.node.find_successor(request_id).await {
            Ok(address) => FindSuccessorReply { found: true, address },
            Err(e) => {
                debug!("find_successor({}) not found: {}", request_id, e);
                FindSuccessorReply { found: false, address: String::new() }
            }
        };
        Ok(Response::new(reply))
    }

    async fn get_identifier(&self, _request: Request<Empty>) -> Result<Response<IdentifierReply>, Status> {
        Ok(Response::new(IdentifierReply { id: self.node.identifier }))
    }

    async fn get_predecessor(&self, _request: Request<Empty>) -> Result<Response<PredecessorReply>, Status> {
        let address = self.node.predecessor().unwrap_or_default();
        Ok(Response::new(PredecessorReply { address }))
    }

    async fn notify(&self, request: Request<NotifyRequest>) -> Result<Response<Empty>, Status> {
        let candidate_address = request.into_inner().candidate_address;
        self.node
            .handle_notify(candidate_address)
            .await
            .map_err(|e| Status::internal(e.to_string()))?;
        Ok(Response::new(Empty {}))
    }

    async fn save_file(&self, request: Request<SaveFileRequest>) -> Result<Response<Empty>, Status> {
        let req = request.into_inner();
        self.node
            .handle_save_file(req.id, req.name, req.content)
            .map_err(|e| Status::internal(e.to_string()))?;
        Ok(Response::new(Empty {}))
    }

    async fn get_file(&self, request: Request<GetFileRequest>) -> Result<Response<GetFileReply>, Status> {
        let id = request.into_inner().id;
        match self.node.handle_get_file(id) {
            Ok((name, content)) => Ok(Response::new(GetFileReply { name, content })),
            Err(e) => Err(Status::not_found(e.to_string())),
        }
    }
}
