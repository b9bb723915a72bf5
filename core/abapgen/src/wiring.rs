//! 配線: 設定値（フラグ > 環境変数 > 既定値）を解決し、標準アダプタで App を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    DirFileSaver, FileJsonLog, NoopLog, StdClock, StdEnvResolver, StdFileSystem, StderrLog,
    StderrNotifier, SystemClipboard, TeeLog,
};
use common::error::Error;
use common::ports::outbound::{
    ClipboardSink, Clock, EnvResolver, FileSaver, FileSystem, Log, Notifier,
};

use crate::adapter::{
    resolve_api_base_url, resolve_templates_base_url, AssistantApi, HttpTemplateSource,
    WorkflowApi,
};
use crate::cli::Config;
use crate::domain::{BackendKind, UploadPolicy};
use crate::ports::outbound::GenerationService;
use crate::usecase::{EngineDeps, EngineOptions, TemplateUseCase, TranscriptEngine};

/// 解決済みの設定値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: BackendKind,
    pub api_url: String,
    pub templates_url: String,
    pub output_dir: PathBuf,
}

/// フラグ > 環境変数 > 既定値 の順に解決する
pub fn resolve_settings(config: &Config, env: &dyn EnvResolver) -> Result<Settings, Error> {
    let backend = match config.backend {
        Some(b) => b,
        None => env
            .var("ABAPGEN_BACKEND")
            .map(|s| {
                s.parse::<BackendKind>()
                    .map_err(|e| Error::env(format!("ABAPGEN_BACKEND: {}", e)))
            })
            .transpose()?
            .unwrap_or_default(),
    };
    let origin = config.origin.clone().or_else(|| env.var("ABAPGEN_ORIGIN"));
    let api_url = config.api_url.clone().or_else(|| env.var("ABAPGEN_API_URL"));
    let templates_url = config
        .templates_url
        .clone()
        .or_else(|| env.var("ABAPGEN_TEMPLATES_URL"));
    let output_dir = config
        .output_dir
        .clone()
        .or_else(|| env.var("ABAPGEN_OUTPUT_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(Settings {
        backend,
        api_url: resolve_api_base_url(api_url.as_deref(), origin.as_deref()),
        templates_url: resolve_templates_base_url(templates_url.as_deref(), origin.as_deref()),
        output_dir,
    })
}

/// 組み立て済みのアプリ
pub struct App {
    pub settings: Settings,
    pub logger: Arc<dyn Log>,
    pub fs: Arc<dyn FileSystem>,
    pub engine_deps: EngineDeps,
    pub engine_options: EngineOptions,
    pub templates: TemplateUseCase,
}

impl App {
    /// 1 セッション分のエンジンを作る
    pub fn engine(&self) -> TranscriptEngine {
        TranscriptEngine::new(self.engine_deps.clone(), self.engine_options.clone())
    }

    pub fn service(&self) -> &Arc<dyn GenerationService> {
        &self.engine_deps.service
    }
}

fn wire_logger(env: &dyn EnvResolver, fs: &Arc<dyn FileSystem>, verbose: bool) -> Arc<dyn Log> {
    // ホームが解決できなければファイルログは出さない
    let file: Arc<dyn Log> = match env.resolve_dirs() {
        Ok(dirs) => Arc::new(FileJsonLog::new(Arc::clone(fs), dirs.log_file())),
        Err(_) => Arc::new(NoopLog),
    };
    if verbose {
        Arc::new(TeeLog::new(vec![file, Arc::new(StderrLog)]))
    } else {
        file
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_abapgen(config: &Config) -> Result<App, Error> {
    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let settings = resolve_settings(config, env.as_ref())?;
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger = wire_logger(env.as_ref(), &fs, config.verbose);

    let service: Arc<dyn GenerationService> = match settings.backend {
        BackendKind::Assistant => Arc::new(AssistantApi::new(settings.api_url.clone())?),
        BackendKind::Workflow => Arc::new(WorkflowApi::new(settings.api_url.clone())?),
    };
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);
    let clipboard: Arc<dyn ClipboardSink> = Arc::new(SystemClipboard);
    let file_saver: Arc<dyn FileSaver> =
        Arc::new(DirFileSaver::new(Arc::clone(&fs), &settings.output_dir));
    let clock: Arc<dyn Clock> = Arc::new(StdClock);

    let templates = TemplateUseCase::new(
        Arc::new(HttpTemplateSource::new(settings.templates_url.clone())?),
        Arc::clone(&file_saver),
        Arc::clone(&notifier),
        Arc::clone(&logger),
    );
    let engine_deps = EngineDeps {
        service,
        notifier,
        clipboard,
        file_saver,
        clock,
        log: Arc::clone(&logger),
    };
    let engine_options = EngineOptions {
        upload_policy: UploadPolicy::default(),
        ricef: config.ricef,
    };
    Ok(App {
        settings,
        logger,
        fs,
        engine_deps,
        engine_options,
        templates,
    })
}
