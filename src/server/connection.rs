use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::error::CommandError;
use crate::protocol::{Dispatcher, Reply, parse_command};
use crate::server::writer::ReplyWriter;

pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    buffer: BytesMut,
    buffer_size: usize,
    dispatcher: Dispatcher,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(String),
    Writing(ReplyWriter, bool), // bool = keep the connection open?
    Closed,
}

impl Connection {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        dispatcher: Dispatcher,
        buffer_size: usize,
    ) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(buffer_size),
            buffer_size,
            dispatcher,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_command().await? {
                    Some(line) => {
                        self.state = ConnectionState::Processing(line);
                    }
                    None => {
                        debug!(peer = %self.peer, "Peer closed the connection");
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(line) => {
                    let reply = Self::handle_command(&self.dispatcher, self.peer, line);
                    let keep_open = reply.keeps_open();

                    let writer = ReplyWriter::new(&reply);
                    self.state = ConnectionState::Writing(writer, keep_open);
                }

                ConnectionState::Writing(writer, keep_open) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_open {
                        self.state = ConnectionState::Reading;
                    } else {
                        info!(peer = %self.peer, "Closing connection on client request");
                        if let Err(e) = self.stream.shutdown().await {
                            debug!(peer = %self.peer, error = %e, "Shutdown after close failed");
                        }
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// One receive call, decoded as one command line.
    ///
    /// Returns `None` once the peer has closed its side.
    pub async fn read_command(&mut self) -> anyhow::Result<Option<String>> {
        self.buffer.clear();
        self.buffer.reserve(self.buffer_size);

        let n = (&mut self.stream)
            .take(self.buffer_size as u64)
            .read_buf(&mut self.buffer)
            .await?;

        if n == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&self.buffer[..n]).into_owned()))
    }

    // Parse and dispatch failures become the reply text; they never end
    // the connection.
    fn handle_command(dispatcher: &Dispatcher, peer: SocketAddr, line: &str) -> Reply {
        debug!(peer = %peer, command = %line.trim(), "Received command");

        let result = parse_command(line)
            .map_err(CommandError::from)
            .and_then(|command| dispatcher.dispatch(&command));

        match result {
            Ok(reply) => reply,
            Err(e) => {
                debug!(peer = %peer, error = %e, "Command rejected");
                Reply::Message(e.to_string())
            }
        }
    }
}
