use std::time::Duration;

/// Connection configuration, read once at startup and handed to
/// [`crate::client::GremlinClient::connect`]. No ambient global config is
/// kept anywhere in this crate.
#[derive(Clone, Debug)]
pub struct ConnectionOptions {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) path: String,
    pub(crate) secure: bool,
    pub(crate) pool_size: usize,
    pub(crate) max_overflow: usize,
    pub(crate) ping_delay: Option<Duration>,
    pub(crate) reconnect_delay: Duration,
    pub(crate) default_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        ConnectionOptions {
            host: String::from("localhost"),
            port: 8182,
            path: String::from("/gremlin"),
            secure: false,
            pool_size: 1,
            max_overflow: 0,
            ping_delay: Some(Duration::from_secs(30)),
            reconnect_delay: Duration::from_secs(1),
            default_timeout: Duration::from_secs(30),
        }
    }
}

impl ConnectionOptions {
    pub fn builder() -> ConnectionOptionsBuilder {
        ConnectionOptionsBuilder::default()
    }

    pub fn websocket_url(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{}://{}:{}{}", scheme, self.host, self.port, self.path)
    }
}

impl<T> From<T> for ConnectionOptions
where
    T: Into<String>,
{
    fn from(host: T) -> Self {
        ConnectionOptions::builder().host(host).build()
    }
}

impl From<(&str, u16)> for ConnectionOptions {
    fn from((host, port): (&str, u16)) -> Self {
        ConnectionOptions::builder().host(host).port(port).build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConnectionOptionsBuilder {
    opts: ConnectionOptions,
}

impl ConnectionOptionsBuilder {
    pub fn host<T: Into<String>>(mut self, host: T) -> Self {
        self.opts.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = port;
        self
    }

    pub fn path<T: Into<String>>(mut self, path: T) -> Self {
        self.opts.path = path.into();
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.opts.secure = secure;
        self
    }

    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.opts.pool_size = pool_size;
        self
    }

    pub fn max_overflow(mut self, max_overflow: usize) -> Self {
        self.opts.max_overflow = max_overflow;
        self
    }

    /// `None` disables scheduled keep-alive pings.
    pub fn ping_delay(mut self, ping_delay: Option<Duration>) -> Self {
        self.opts.ping_delay = ping_delay;
        self
    }

    pub fn reconnect_delay(mut self, reconnect_delay: Duration) -> Self {
        self.opts.reconnect_delay = reconnect_delay;
        self
    }

    pub fn default_timeout(mut self, default_timeout: Duration) -> Self {
        self.opts.default_timeout = default_timeout;
        self
    }

    pub fn build(self) -> ConnectionOptions {
        self.opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gremlin_server_conventions() {
        let opts = ConnectionOptions::default();
        assert_eq!(8182, opts.port);
        assert_eq!("/gremlin", opts.path);
        assert!(!opts.secure);
        assert_eq!("ws://localhost:8182/gremlin", opts.websocket_url());
    }

    #[test]
    fn secure_uses_wss_scheme() {
        let opts = ConnectionOptions::builder()
            .host("example.org")
            .port(443)
            .secure(true)
            .build();
        assert_eq!("wss://example.org:443/gremlin", opts.websocket_url());
    }

    #[test]
    fn tuple_conversion_sets_host_and_port() {
        let opts: ConnectionOptions = ("localhost", 8182).into();
        assert_eq!("localhost", opts.host);
        assert_eq!(8182, opts.port);
    }
}
