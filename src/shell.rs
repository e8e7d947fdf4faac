//! Interactive command prompt: `Lookup`, `PrintState`, `StoreFile` and `Get`,
//! matching the reference tool's four operator commands. Runs on a blocking
//! thread since it waits on stdin; every command it drives is itself async.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::error;

use crate::client_ops;
use crate::node::ChordNode;

pub async fn run(node: Arc<ChordNode>) {
    let mut lines = spawn_stdin_reader();
    loop {
        print!("Command: ");
        let _ = io::stdout().flush();

        let Some(line) = lines.recv().await else {
            break;
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command {
            "Lookup" => {
                let key = prompt(&mut lines, "Key: ").await;
                match client_ops::lookup(&node, &key).await {
                    Ok(address) => println!("Key is at address: {address}"),
                    Err(e) => error!("lookup failed: {e}"),
                }
            }
            "PrintState" => print_state(&node),
            "StoreFile" => {
                let path = prompt(&mut lines, "File: ").await;
                match client_ops::store_file(&node, Path::new(&path)).await {
                    Ok(()) => println!("File saved"),
                    Err(e) => error!("storing file failed: {e}"),
                }
            }
            "Get" => {
                let name = prompt(&mut lines, "File: ").await;
                match client_ops::get_file(&node, &name, &PathBuf::from(".")).await {
                    Ok(dest) => println!("File fetched to {}", dest.display()),
                    Err(e) => error!("fetching file failed: {e}"),
                }
            }
            other => println!("Unknown command: {other}"),
        }
    }
}

async fn prompt(lines: &mut tokio::sync::mpsc::Receiver<String>, label: &str) -> String {
    print!("{label}");
    let _ = io::stdout().flush();
    lines.recv().await.unwrap_or_default().trim().to_string()
}

fn print_state(node: &Arc<ChordNode>) {
    println!("Node Identifier: {}", node.identifier);
    println!("Node Address: {}", node.address);
    println!("Node Predecessor: {:?}", node.predecessor());
    println!("Node Successor: {}", node.successor());
    println!("Node Finger Table:");
    for (i, entry) in node.snapshot_fingers().iter().enumerate() {
        println!("Finger Entry: {}, ID: {}, Address: {}", i + 1, entry.target, entry.address);
    }
}

/// Moves blocking stdin reads onto their own thread so the async runtime
/// never stalls waiting on a line of operator input.
fn spawn_stdin_reader() -> tokio::sync::mpsc::Receiver<String> {
    let (tx, rx) = tokio::sync::mpsc::channel(1);
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}
