//! Driver connection parameters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters handed to a database driver when opening a connection
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParams {
    /// Driver name (e.g. "pdo_pgsql", "memory")
    pub driver: String,
    /// Full connection URL, takes precedence over the discrete fields
    pub url: Option<String>,
    /// Database host
    pub host: Option<String>,
    /// Database port
    pub port: Option<u16>,
    /// User name
    pub user: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Database name
    pub dbname: Option<String>,
    /// File of a file-based database (SQLite)
    pub path: Option<String>,
    /// Client charset
    pub charset: Option<String>,
    /// Server version hint, skips detection when set
    pub server_version: Option<String>,
    /// Platform hint for drivers that serve several platforms
    pub platform: Option<String>,
    /// Maximum number of pooled sessions
    pub pool_size: Option<u32>,
    /// Driver specific options
    pub options: BTreeMap<String, String>,
}

impl ConnectionParams {
    /// Create parameters for the given driver
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            ..Default::default()
        }
    }

    /// Set the host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set user and password
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Set the database name
    pub fn with_dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }

    /// Set the database file
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the platform hint
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Set the server version hint
    pub fn with_server_version(mut self, version: impl Into<String>) -> Self {
        self.server_version = Some(version.into());
        self
    }

    /// Set the connection URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build a URL for `scheme`, or return the configured one
    pub fn to_url(&self, scheme: &str) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut url = format!("{scheme}://");
        if let Some(user) = &self.user {
            url.push_str(user);
            if let Some(password) = &self.password {
                url.push(':');
                url.push_str(password);
            }
            url.push('@');
        }
        url.push_str(self.host.as_deref().unwrap_or("localhost"));
        if let Some(port) = self.port {
            url.push_str(&format!(":{port}"));
        }
        if let Some(dbname) = &self.dbname {
            url.push('/');
            url.push_str(dbname);
        }
        url
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("driver", &self.driver)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .field("path", &self.path)
            .field("charset", &self.charset)
            .field("server_version", &self.server_version)
            .field("platform", &self.platform)
            .field("pool_size", &self.pool_size)
            .finish_non_exhaustive()
    }
}
