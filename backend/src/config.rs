use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:5001";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:snuffle.db";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_MEDIA_DIR: &str = "media";
pub const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:5001/media";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// How bearer tokens issued by the identity provider are verified.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthKey {
    /// HS256 shared secret
    Secret(String),
    /// PEM-encoded RSA public key for RS256
    RsaPublicKeyPem(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    pub key: AuthKey,
    pub issuer: Option<String>,
}

/// Identity provider endpoint holding per-user metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileApiConfig {
    pub base_url: String,
    pub api_key: String,
}

// Server configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub cors_origin: String,
    pub media_dir: PathBuf,
    pub media_base_url: String,
    pub max_upload_bytes: usize,
    pub auth: AuthConfig,
    pub profile_api: Option<ProfileApiConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfigOverride {
    bind_addr: Option<String>,
    database_url: Option<String>,
    cors_origin: Option<String>,
    media_dir: Option<String>,
    media_base_url: Option<String>,
    max_upload_bytes: Option<usize>,
    jwt_issuer: Option<String>,
    profile_api_url: Option<String>,
    profile_api_key: Option<String>,
}

fn database_url_from_env() -> String {
    std::env::var("SNUFFLE_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

fn yaml_from_env() -> Result<Option<String>> {
    match std::env::var("SNUFFLE_CONFIG") {
        Ok(path) => fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("read SNUFFLE_CONFIG: {path}")),
        Err(_) => Ok(None),
    }
}

/// Database URL for the batch binaries, resolved like the server's:
/// `SNUFFLE_DATABASE_URL`, overridden by `database_url` in the `SNUFFLE_CONFIG`
/// file. Needs none of the auth settings.
pub fn database_url() -> Result<String> {
    resolve_database_url(database_url_from_env(), yaml_from_env()?.as_deref())
}

fn resolve_database_url(from_env: String, yaml: Option<&str>) -> Result<String> {
    let Some(contents) = yaml else {
        return Ok(from_env);
    };
    let override_cfg: AppConfigOverride =
        serde_yaml::from_str(contents).with_context(|| "parse snuffle config yaml")?;
    Ok(override_cfg.database_url.unwrap_or(from_env))
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("SNUFFLE_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .with_context(|| "parse SNUFFLE_BIND")?;
        let max_upload_bytes = match std::env::var("SNUFFLE_MAX_UPLOAD_BYTES") {
            Ok(value) => value
                .parse()
                .with_context(|| "parse SNUFFLE_MAX_UPLOAD_BYTES")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let key = match (
            std::env::var("SNUFFLE_JWT_SECRET"),
            std::env::var("SNUFFLE_JWT_PUBLIC_KEY_PATH"),
        ) {
            (Ok(secret), _) if !secret.is_empty() => AuthKey::Secret(secret),
            (_, Ok(path)) => {
                let pem = fs::read_to_string(&path)
                    .with_context(|| format!("read SNUFFLE_JWT_PUBLIC_KEY_PATH: {path}"))?;
                AuthKey::RsaPublicKeyPem(pem)
            }
            _ => bail!("either SNUFFLE_JWT_SECRET or SNUFFLE_JWT_PUBLIC_KEY_PATH must be set"),
        };

        let profile_api = match (
            std::env::var("SNUFFLE_PROFILE_API_URL"),
            std::env::var("SNUFFLE_PROFILE_API_KEY"),
        ) {
            (Ok(base_url), Ok(api_key)) => Some(ProfileApiConfig { base_url, api_key }),
            (Ok(_), Err(_)) => bail!("SNUFFLE_PROFILE_API_URL is set without SNUFFLE_PROFILE_API_KEY"),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            database_url: database_url_from_env(),
            cors_origin: std::env::var("SNUFFLE_CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            media_dir: PathBuf::from(
                std::env::var("SNUFFLE_MEDIA_DIR").unwrap_or_else(|_| DEFAULT_MEDIA_DIR.to_string()),
            ),
            media_base_url: std::env::var("SNUFFLE_MEDIA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MEDIA_BASE_URL.to_string()),
            max_upload_bytes,
            auth: AuthConfig {
                key,
                issuer: std::env::var("SNUFFLE_JWT_ISSUER").ok(),
            },
            profile_api,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Some(contents) = yaml_from_env()? {
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    /// Apply overrides from a YAML document. Keys that are absent keep their value.
    pub fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: AppConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse snuffle config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.database_url {
            self.database_url = value;
        }
        if let Some(value) = override_cfg.cors_origin {
            self.cors_origin = value;
        }
        if let Some(value) = override_cfg.media_dir {
            self.media_dir = PathBuf::from(value);
        }
        if let Some(value) = override_cfg.media_base_url {
            self.media_base_url = value;
        }
        if let Some(value) = override_cfg.max_upload_bytes {
            self.max_upload_bytes = value;
        }
        if let Some(value) = override_cfg.jwt_issuer {
            self.auth.issuer = Some(value);
        }
        match (override_cfg.profile_api_url, override_cfg.profile_api_key) {
            (Some(base_url), Some(api_key)) => {
                self.profile_api = Some(ProfileApiConfig { base_url, api_key });
            }
            (Some(base_url), None) => match &mut self.profile_api {
                Some(api) => api.base_url = base_url,
                None => bail!("profile_api_url is set without profile_api_key"),
            },
            (None, Some(api_key)) => match &mut self.profile_api {
                Some(api) => api.api_key = api_key,
                None => bail!("profile_api_key is set without profile_api_url"),
            },
            (None, None) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            bind_addr: DEFAULT_BIND.parse().expect("bind"),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            auth: AuthConfig {
                key: AuthKey::Secret("secret".to_string()),
                issuer: None,
            },
            profile_api: None,
        }
    }

    #[test]
    fn test_yaml_overrides_only_present_keys() {
        let mut config = base_config();
        config
            .apply_yaml(
                "bind_addr: 0.0.0.0:9000\nmedia_dir: /var/snuffle/media\nmax_upload_bytes: 1024\n",
            )
            .expect("apply");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.media_dir, PathBuf::from("/var/snuffle/media"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
    }

    #[test]
    fn test_yaml_profile_api_requires_both_keys() {
        let mut config = base_config();
        let err = config
            .apply_yaml("profile_api_url: https://idp.example.com\n")
            .expect_err("missing key");
        assert!(err.to_string().contains("profile_api_key"));

        config
            .apply_yaml("profile_api_url: https://idp.example.com\nprofile_api_key: sk_test\n")
            .expect("apply");
        assert_eq!(
            config.profile_api,
            Some(ProfileApiConfig {
                base_url: "https://idp.example.com".to_string(),
                api_key: "sk_test".to_string(),
            })
        );
    }

    #[test]
    fn test_batch_database_url_honours_yaml() {
        let from_env = "sqlite:env.db".to_string();

        assert_eq!(
            resolve_database_url(from_env.clone(), None).expect("resolve"),
            "sqlite:env.db"
        );
        assert_eq!(
            resolve_database_url(from_env.clone(), Some("media_dir: /srv/media\n"))
                .expect("resolve"),
            "sqlite:env.db"
        );
        assert_eq!(
            resolve_database_url(from_env.clone(), Some("database_url: sqlite:/srv/snuffle.db\n"))
                .expect("resolve"),
            "sqlite:/srv/snuffle.db"
        );
        assert!(resolve_database_url(from_env, Some("database_url: [\n")).is_err());
    }

    #[test]
    fn test_batch_database_url_matches_server_config() {
        let yaml = "database_url: sqlite:/srv/snuffle.db\ncors_origin: https://snuffle.example\n";
        let mut config = base_config();
        config.apply_yaml(yaml).expect("apply");

        let batch = resolve_database_url(DEFAULT_DATABASE_URL.to_string(), Some(yaml))
            .expect("resolve");
        assert_eq!(batch, config.database_url);
    }

    #[test]
    fn test_yaml_rejects_bad_bind_addr() {
        let mut config = base_config();
        assert!(config.apply_yaml("bind_addr: not-an-addr\n").is_err());
    }

    #[test]
    fn test_yaml_sets_issuer() {
        let mut config = base_config();
        config.apply_yaml("jwt_issuer: https://clerk.example.com\n").expect("apply");
        assert_eq!(config.auth.issuer.as_deref(), Some("https://clerk.example.com"));
    }
}
