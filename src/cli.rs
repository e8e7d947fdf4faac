//! Command-line surface. Every flag from the design's external-interfaces
//! section is represented; nothing beyond `RUST_LOG` configures the node.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chordd", about = "A single Chord DHT ring participant")]
pub struct Cli {
    /// IP address to bind and advertise.
    #[arg(short = 'a', long = "address")]
    pub address: String,

    /// Port to bind and listen on.
    #[arg(short = 'p', long = "port")]
    pub port: u16,

    /// Address of an existing Chord node to join. Omit to create a new ring.
    #[arg(long = "join-address")]
    pub join_address: Option<String>,

    /// Port of the existing Chord node named by --join-address.
    #[arg(long = "join-port")]
    pub join_port: Option<u16>,

    /// Milliseconds between invocations of stabilize.
    #[arg(long = "stabilize-ms", default_value_t = 1000)]
    pub stabilize_ms: u64,

    /// Milliseconds between invocations of fix-fingers.
    #[arg(long = "fix-fingers-ms", default_value_t = 1000)]
    pub fix_fingers_ms: u64,

    /// Milliseconds between invocations of check-predecessor.
    #[arg(long = "check-predecessor-ms", default_value_t = 1000)]
    pub check_predecessor_ms: u64,

    /// Number of successors the client is asked to maintain. Accepted for
    /// compatibility with the reference CLI; this node keeps a single
    /// successor (see the design doc's Open Questions).
    #[arg(short = 'r', long = "successors", default_value_t = 1)]
    pub successors: usize,

    /// Identifier preimage. Defaults to the bind address when omitted.
    #[arg(short = 'i', long = "identifier")]
    pub identifier: Option<String>,

    /// Base directory under which `<identifier>/<name>` files are stored.
    #[arg(long = "files-dir", default_value = "files")]
    pub files_dir: String,

    /// Per-RPC timeout in milliseconds.
    #[arg(long = "rpc-timeout-ms", default_value_t = 2000)]
    pub rpc_timeout_ms: u64,
}

impl Cli {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn join_peer(&self) -> Option<String> {
        match (&self.join_address, self.join_port) {
            (Some(addr), Some(port)) => Some(format!("{addr}:{port}")),
            _ => None,
        }
    }
}
