use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_smtp::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

pub struct Server {
    pub token_service: Arc<dyn TokenService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (token_service, pool): (Arc<dyn TokenService>, Option<Pool<MySql>>) =
            match settings.auth.backend.as_str() {
                "fake" => (Arc::new(FakeTokenService::new()), None),
                // Real engine over in-memory stores: local development
                // without MySQL or an SMTP relay. State dies with the
                // process.
                "memory" => {
                    let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new());
                    let token_repo: Arc<dyn TokenRepo> = Arc::new(MemoryTokenRepo::new());
                    let notifier: Arc<dyn WarningNotifier> = Arc::new(MemoryNotifier::new());

                    let service = Arc::new(RealTokenService::new(
                        user_repo,
                        token_repo,
                        Self::token_codec(settings),
                        Arc::new(Argon2SecretGenerator::new()),
                        notifier,
                        chrono::Duration::seconds(settings.jwt.refresh_ttl_secs),
                    ));

                    (service as Arc<dyn TokenService>, None)
                }
                "real" => {
                    let pool = Pool::<MySql>::connect(&settings.database.dsn).await?;

                    let user_repo: Arc<dyn UserRepo> = Arc::new(MySqlUserRepo::new(pool.clone()));
                    let token_repo: Arc<dyn TokenRepo> =
                        Arc::new(MySqlTokenRepo::new(pool.clone()));

                    let notifier: Arc<dyn WarningNotifier> =
                        Arc::new(SmtpNotifier::try_new(&SmtpConfig {
                            host: settings.smtp.host.clone(),
                            port: settings.smtp.port,
                            user: settings.smtp.user.clone(),
                            password: settings.smtp.password.clone(),
                            from: settings.smtp.from.clone(),
                        })?);

                    let service = Arc::new(RealTokenService::new(
                        user_repo,
                        token_repo,
                        Self::token_codec(settings),
                        Arc::new(Argon2SecretGenerator::new()),
                        notifier,
                        chrono::Duration::seconds(settings.jwt.refresh_ttl_secs),
                    ));

                    (service as Arc<dyn TokenService>, Some(pool))
                }
                other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
            };

        info!("server started");

        Ok(Self {
            token_service,
            pool,
        })
    }

    fn token_codec(settings: &Settings) -> Arc<dyn TokenCodec> {
        Arc::new(JwtHs512Codec::new(JwtConfig {
            access_ttl: Duration::from_secs(settings.jwt.access_ttl_secs),
            signing_key: settings.jwt.signing_key.clone().into_bytes(),
        }))
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
