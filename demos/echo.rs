//! Echo over `{packet, 2}` framing.
//!
//! This example demonstrates:
//! - Building a protocol from a JSON config
//! - Serving packets with a blocking `PacketConn`
//! - Sending raw and MsgPack messages from a client
//!
//! Run with `RUST_LOG=trace cargo run --example echo` to see framing events.

use std::net::{TcpListener, TcpStream};
use std::thread;

use packet_link::codec::{MsgPackCodec, MsgPackMessage};
use packet_link::{PacketConn, ProtocolConfig};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
struct Greeting {
    from: String,
    seq: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProtocolConfig::from_json(
        r#"{"head_size": 2, "byte_order": "big", "max_packet_size": 4096}"#,
    )?;
    let protocol = config.build()?;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    let server = thread::spawn(move || -> packet_link::Result<()> {
        let (stream, peer) = listener.accept()?;
        tracing::info!("Accepted {}", peer);
        let mut conn = PacketConn::new(stream, protocol);
        loop {
            let payload = match conn.receive() {
                Ok(payload) => payload.to_vec(),
                Err(e) if e.is_unexpected_eof() => return Ok(()),
                Err(e) => return Err(e),
            };
            conn.send(&payload)?;
        }
    });

    let mut client = PacketConn::new(TcpStream::connect(addr)?, protocol);

    client.send("hello")?;
    println!("echo: {}", String::from_utf8_lossy(client.receive()?));

    let greeting = Greeting {
        from: "client".to_string(),
        seq: 1,
    };
    client.send(&MsgPackMessage::new(&greeting))?;
    let echoed: Greeting = MsgPackCodec::decode(client.receive()?)?;
    println!("echo: {:?}", echoed);

    drop(client);
    server.join().map_err(|_| "server thread panicked")??;

    Ok(())
}
