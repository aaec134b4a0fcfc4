use async_trait::async_trait;
use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Connection Error: {}", source))]
    Connection {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Turns a connection pool into a ready-to-use gateway.
#[async_trait]
pub trait Remote {
    type Conn;
    type Config;

    async fn conn(self, config: Self::Config) -> Result<Self::Conn, Error>;
}
