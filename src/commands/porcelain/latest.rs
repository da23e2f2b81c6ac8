use crate::areas::repository::Repository;
use crate::areas::shell::ShellFallback;
use crate::artifacts::recency::{RecencyWindow, render_lines};
use crate::artifacts::resolve::Strategy;
use crate::artifacts::resolve::coordinator::resolve_all;
use crate::artifacts::resolve::head_resolver::HeadResolver;
use crate::artifacts::resolve::report::ResolutionReport;
use colored::Colorize;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LatestOptions {
    pub strategy: Strategy,
    /// Time the shell strategy before the chosen one and report both
    pub compare: bool,
    pub window: RecencyWindow,
    pub max_concurrency: usize,
    pub native_timeout: Duration,
    pub fallback_timeout: Duration,
    pub git_binary: String,
}

impl Repository {
    pub async fn latest(&self, opts: &LatestOptions) -> anyhow::Result<()> {
        let branches = self.refs().list_branches()?;
        writeln!(
            self.writer(),
            "Got {} branches to look up...\n",
            branches.len()
        )?;

        let fallback = ShellFallback::new(
            opts.git_binary.clone(),
            self.path().into(),
            opts.fallback_timeout,
        );
        let resolver = HeadResolver::new(
            self.database(),
            self.refs(),
            Arc::new(fallback),
            opts.native_timeout,
        );

        let mut strategies = Vec::with_capacity(2);
        if opts.compare && opts.strategy != Strategy::Shell {
            strategies.push(Strategy::Shell);
        }
        strategies.push(opts.strategy);

        let mut report = ResolutionReport::default();
        for strategy in strategies {
            let started = Instant::now();
            report = resolve_all(resolver.clone(), &branches, strategy, opts.max_concurrency)
                .await?;

            writeln!(
                self.writer(),
                "{} resolution took: {:?}",
                strategy,
                started.elapsed()
            )?;
        }
        writeln!(self.writer())?;

        if opts.strategy == Strategy::Hybrid && report.fallbacks() > 0 {
            writeln!(
                self.writer(),
                "{} Fallback to shelling out necessary in {} instances.",
                "WARN:".yellow().bold(),
                report.fallbacks()
            )?;
            if report.timed_out() > 0 {
                writeln!(
                    self.writer(),
                    "{} {} of them because the loose object read took longer than {:?}.",
                    "WARN:".yellow().bold(),
                    report.timed_out(),
                    opts.native_timeout
                )?;
            }
            writeln!(self.writer())?;
        }

        let now = chrono::Utc::now().timestamp();
        let recent = opts.window.select(report.resolved(), now);
        tracing::info!(
            hours = opts.window.hours(),
            recent = recent.len(),
            "selected recently committed branches"
        );
        for line in render_lines(&recent, now, &chrono::Local) {
            writeln!(self.writer(), "{line}")?;
        }

        for failure in report.failures() {
            eprintln!("{} {failure}", "error:".red().bold());
        }

        Ok(())
    }
}
