use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{ProbeKind, ProbeOutcome, ScanSummary, ServiceOutcome, TargetService};
use crate::probes;

pub struct Scanner {
    client: HttpClient,
    config: ScanConfig,
    semaphore: Arc<Semaphore>,
    probes: Vec<ProbeKind>,
    show_progress: bool,
}

impl Scanner {
    pub fn new(config: ScanConfig, bearer_token: Option<String>) -> Result<Self> {
        let client = HttpClient::new(config.timeout(), &config.user_agent)?
            .with_bearer_token(bearer_token);
        let concurrency = config.concurrency.max(1);

        Ok(Self {
            client,
            config,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            probes: ProbeKind::ALL.to_vec(),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Restricts the scan to `probes`, still run in their canonical order.
    pub fn with_probes(mut self, probes: &[ProbeKind]) -> Self {
        self.probes = ProbeKind::ALL
            .into_iter()
            .filter(|p| probes.contains(p))
            .collect();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }

    pub fn services(&self) -> &[TargetService] {
        &self.config.services
    }

    /// Runs every probe in order and aggregates the findings.
    pub async fn run(&self) -> ScanSummary {
        info!(
            services = self.config.services.len(),
            authenticated = self.is_authenticated(),
            "starting penetration test"
        );
        let start = Instant::now();

        let mut outcomes = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            outcomes.push(self.run_probe(*probe).await);
        }

        let duration = start.elapsed().as_secs_f64();
        let summary = ScanSummary::from_outcomes(outcomes, self.config.services.len(), duration);
        info!(
            total = summary.total_vulnerabilities,
            status = %summary.overall_security_status,
            duration_secs = duration,
            "penetration test complete"
        );
        summary
    }

    /// One probe across all services. Services may run concurrently; results
    /// are merged in service order.
    pub async fn run_probe(&self, probe: ProbeKind) -> ProbeOutcome {
        info!(probe = %probe, "testing");
        let pb = self.create_progress_bar(probe);

        let futures: Vec<_> = self
            .config
            .services
            .iter()
            .map(|service| self.scan_service(probe, service, &pb))
            .collect();

        let results = join_all(futures).await;
        pb.finish_and_clear();

        let mut outcome = ProbeOutcome::new(probe);
        for (service, result) in self.config.services.iter().zip(results) {
            outcome.push_service(&service.name, result);
        }
        outcome
    }

    async fn scan_service(
        &self,
        probe: ProbeKind,
        service: &TargetService,
        pb: &ProgressBar,
    ) -> ServiceOutcome {
        // The semaphore is never closed, so the permit is always granted.
        let _permit = self.semaphore.acquire().await.ok();
        pb.set_message(service.name.clone());

        let outcome =
            probes::scan_service(probe, &self.client, service, &self.config.probes).await;

        pb.inc(1);
        outcome
    }

    fn create_progress_bar(&self, probe: ProbeKind) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(
            Some(self.config.services.len() as u64),
            ProgressDrawTarget::stderr(),
        );
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:<24} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_prefix(probe.to_string());
        pb
    }
}
