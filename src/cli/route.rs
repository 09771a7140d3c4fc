//! CLI route: single route table and run context. Dispatches to the session and presentation.

use crate::catalog::{CatalogQuery, CatalogSource, Category, ItemId, StaticCatalog};
use crate::cli::help::command_name;
use crate::cli::parse::{Commands, SkillArg};
use crate::cli::presentation::{
    format_build_json, format_build_text, format_catalog_json, format_catalog_text,
};
use crate::config::{ConfigLoader, SkillwrightConfig};
use crate::error::ApiError;
use crate::job::{JobSnapshot, JobStatus};
use crate::registry::{
    HttpRegistrationService, LocalRegistrationService, RegistrationPlan, RegistrationService,
};
use crate::selection::ToggleOutcome;
use crate::session::{InstanceSettings, SkillSession};
use crate::transport::{GenerationTransport, HttpGenerationTransport};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// File name of an exported skill.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Outcome of a headless build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub jobs: Vec<JobSnapshot>,
    pub written: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationPlan>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn done_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| job.status == JobStatus::Done)
            .count()
    }
}

/// What `build` should do besides generating.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub out: Option<PathBuf>,
    pub register: Option<String>,
    pub wallet: Option<String>,
}

/// Runtime context for CLI execution: workspace, effective configuration and catalog.
pub struct RunContext {
    workspace_root: PathBuf,
    config: SkillwrightConfig,
    catalog: Arc<StaticCatalog>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::with_config(workspace_root, config)
    }

    pub fn with_config(workspace_root: PathBuf, config: SkillwrightConfig) -> Result<Self, ApiError> {
        config.ensure_valid()?;
        Ok(Self {
            workspace_root,
            config,
            catalog: Arc::new(StaticCatalog::builtin()),
        })
    }

    pub fn config(&self) -> &SkillwrightConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Catalog {
                category,
                search,
                format,
            } => self.handle_catalog(category, search.as_deref(), format),
            Commands::Config => self.config.to_toml(),
            Commands::Build {
                skills,
                out,
                register,
                wallet,
                format,
            } => {
                let options = BuildOptions {
                    out: out.as_ref().map(|dir| self.resolve(dir)),
                    register: register.clone(),
                    wallet: wallet.clone(),
                };
                let transport: Arc<dyn GenerationTransport> =
                    Arc::new(HttpGenerationTransport::new(&self.config.generation)?);
                let rt = tokio::runtime::Runtime::new().map_err(|e| {
                    ApiError::ProviderError(format!("Failed to create runtime: {}", e))
                })?;
                let report = rt.block_on(self.build(transport, skills, &options))?;
                match format.as_str() {
                    "json" => format_build_json(&report),
                    _ => Ok(format_build_text(&report)),
                }
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    fn handle_catalog(
        &self,
        category: &str,
        search: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let mut query = CatalogQuery::all();
        if let Some(category) = Category::parse_filter(category).map_err(ApiError::InvalidRequest)? {
            query = query.category(category);
        }
        if let Some(keyword) = search {
            query = query.keyword(keyword);
        }
        let page = self.catalog.query(&query);
        match format {
            "json" => format_catalog_json(&page),
            _ => Ok(format_catalog_text(&page)),
        }
    }

    /// Run one headless session: select, generate concurrently, export, prepare registration.
    pub async fn build(
        &self,
        transport: Arc<dyn GenerationTransport>,
        skills: &[SkillArg],
        options: &BuildOptions,
    ) -> Result<BuildReport, ApiError> {
        let mut session = SkillSession::new(
            &self.config,
            Arc::clone(&self.catalog) as Arc<dyn CatalogSource>,
            transport,
        );
        session.configure(InstanceSettings::from_config(&self.config));
        session.advance()?;

        let mut warnings = Vec::new();
        let mut requested = Vec::new();
        for skill in skills {
            let item_id = ItemId::from(skill.item_id.as_str());
            if session.selection().contains(&item_id) {
                warnings.push(format!("'{}' given more than once; first prompt kept", item_id));
                continue;
            }
            match session.toggle(&item_id)? {
                ToggleOutcome::Added => requested.push((item_id, skill.prompt.clone())),
                _ => warnings.push(format!(
                    "'{}' skipped: at most {} apps per build",
                    item_id, self.config.selection.capacity
                )),
            }
        }
        session.advance()?;

        let mut started = Vec::with_capacity(requested.len());
        for (item_id, prompt) in &requested {
            match session.generate(item_id, prompt) {
                Ok(_) => started.push(item_id),
                Err(e) if e.is_caller_error() => {
                    warn!(item_id = %item_id, error = %e, "Generation not started");
                    warnings.push(format!("'{}' skipped: {}", item_id, e));
                }
                Err(e) => return Err(e),
            }
        }
        for item_id in started {
            session.wait_settled(item_id).await;
        }

        let mut report = BuildReport {
            jobs: session.jobs(),
            written: Vec::new(),
            registration: None,
            warnings,
        };

        if let Some(out) = &options.out {
            report.written = write_skill_files(out, &session.completed_skills())?;
        }

        if let Some(agent_name) = &options.register {
            match session.advance() {
                Ok(_) => {
                    let request = session.registration_request(agent_name, options.wallet.clone())?;
                    let service = self.registration_service()?;
                    report.registration = Some(service.prepare(&request).await?);
                }
                Err(ApiError::StepBlocked(reason)) => {
                    warn!(reason = %reason, "Registration skipped");
                    report.warnings.push(format!("registration skipped: {}", reason));
                }
                Err(e) => return Err(e),
            }
        }

        session.shutdown();
        Ok(report)
    }

    fn registration_service(&self) -> Result<Box<dyn RegistrationService>, ApiError> {
        Ok(match &self.config.registry.endpoint {
            Some(endpoint) => Box::new(HttpRegistrationService::new(endpoint.clone())?),
            None => Box::new(LocalRegistrationService::new(&self.config.registry)?),
        })
    }
}

/// Write `<out>/<id>/SKILL.md` for each job, returning the written paths.
pub fn write_skill_files(out: &Path, jobs: &[JobSnapshot]) -> Result<Vec<PathBuf>, ApiError> {
    let mut written = Vec::with_capacity(jobs.len());
    for job in jobs {
        let dir = out.join(job.item_id.as_str());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(SKILL_FILE_NAME);
        std::fs::write(&path, &job.text)?;
        written.push(path);
    }
    Ok(written)
}
