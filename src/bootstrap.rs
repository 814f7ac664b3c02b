//! Wiring of the verification pipeline from configuration.

use crate::client::{AsyncCrmClient, AsyncCrmClientImpl, CrmClient};
use crate::config::Config;
use crate::metrics::Metrics;
use crate::persistence::BatchWriter;
use crate::quality::{DataQualityAssessor, DnsMailDomainChecker, MailDomainChecker};
use crate::rate_limit::RateLimiter;
use crate::repositories::{ContactRepository, CrmContactRepository};
use crate::search::{BrowserSession, SearchBackend, SearchDelay, SearchEngine, WebDriverBackend};
use crate::services::{QualityVerifier, RunOptions, SearchVerifier, VerificationService};
use std::sync::Arc;

/// Shared components for one process: used by the CLI for a single run and
/// by the tool server for its whole lifetime.
pub struct AppContext {
    pub config: Config,
    pub metrics: Metrics,
    pub limiter: Arc<RateLimiter>,
    pub search_verifier: Arc<SearchVerifier>,
    pub quality_verifier: Arc<QualityVerifier>,
    pub service: Arc<VerificationService>,
    session: Option<Arc<BrowserSession>>,
}

impl AppContext {
    /// Build the production pipeline: CRM REST client, WebDriver search
    /// backends and DNS-backed email checks.
    pub fn build(config: &Config) -> Self {
        let metrics = Metrics::new();

        let client = CrmClient::new(config, metrics.clone());
        let client = Arc::new(AsyncCrmClientImpl::new(client)) as Arc<dyn AsyncCrmClient>;
        let repository = Arc::new(CrmContactRepository::new(client)) as Arc<dyn ContactRepository>;

        let session = Arc::new(BrowserSession::new(config.webdriver_url.clone()));
        let backends = WebDriverBackend::for_all_engines(session.clone(), config.navigation_timeout());

        let mail_checker = config
            .validate_email
            .then(|| Arc::new(DnsMailDomainChecker::new()) as Arc<dyn MailDomainChecker>);

        let mut context = Self::with_components(config, metrics, repository, backends, mail_checker);
        context.session = Some(session);
        context
    }

    /// Build the pipeline around externally supplied components.
    pub fn with_components(
        config: &Config,
        metrics: Metrics,
        repository: Arc<dyn ContactRepository>,
        backends: Vec<Arc<dyn SearchBackend>>,
        mail_checker: Option<Arc<dyn MailDomainChecker>>,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.min_request_interval()));

        let engine = Arc::new(SearchEngine::new(
            backends,
            limiter.clone(),
            SearchDelay::from_millis(config.search_delay_min_ms, config.search_delay_max_ms),
            metrics.clone(),
        ));
        tracing::debug!(engines = ?engine.backend_names(), "Search strategies configured");
        let search_verifier = Arc::new(SearchVerifier::new(engine, config.contact_delay()));

        let assessor = DataQualityAssessor::new(config.validate_email, mail_checker);
        let quality_verifier = Arc::new(QualityVerifier::new(assessor));

        let writer = BatchWriter::new(
            repository.clone(),
            limiter.clone(),
            config.batch_size,
            metrics.clone(),
        );
        let service = Arc::new(VerificationService::new(
            repository,
            writer,
            Some(config.report_dir.clone()),
            metrics.clone(),
        ));

        Self {
            config: config.clone(),
            metrics,
            limiter,
            search_verifier,
            quality_verifier,
            service,
            session: None,
        }
    }

    /// Run options from configuration, before any per-run overrides.
    pub fn default_run_options(&self) -> RunOptions {
        RunOptions {
            limit: self.config.contact_limit,
            months: self.config.staleness_months,
            dry_run: self.config.dry_run,
        }
    }

    /// Release the browser session, if one was started.
    pub async fn shutdown(&self) {
        if let Some(ref session) = self.session {
            session.close().await;
        }
    }
}
