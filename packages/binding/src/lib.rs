#![deny(clippy::all)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use group_icons::markdown;
use group_icons::{GroupIconPlugin, ModuleHost, PluginOptions, StylesheetJob, TitleBarOptions};
use napi::bindgen_prelude::*;
use napi::{Env, Task};
use napi_derive::napi;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Module graph requests queued for the JavaScript side, which owns the dev
/// server. Every requested module is treated as known; the shim skips ids the
/// graph does not have.
#[derive(Default, Clone)]
struct DeferredHost {
  pending: Rc<RefCell<Vec<String>>>,
}

impl ModuleHost for DeferredHost {
  fn invalidate_module(&self, id: &str) -> bool {
    self.pending.borrow_mut().push(id.to_string());
    true
  }

  fn reload_module(&self, _id: &str) {}
}

fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

fn to_napi_error(err: impl std::fmt::Display) -> Error {
  Error::from_reason(format!("{:#}", err))
}

#[napi]
pub struct GroupIconsPlugin {
  inner: GroupIconPlugin,
  host: DeferredHost,
  runtime: Arc<Runtime>,
}

#[napi]
impl GroupIconsPlugin {
  #[napi(constructor)]
  pub fn new(options: Option<serde_json::Value>) -> Result<Self> {
    init_logging();
    let base_dir = std::env::current_dir().map_err(to_napi_error)?;
    let options = match options {
      Some(value) => PluginOptions::from_value(value, &base_dir).map_err(to_napi_error)?,
      None => PluginOptions::default(),
    };
    let inner = GroupIconPlugin::new(&options).map_err(to_napi_error)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
      .worker_threads(2)
      .enable_all()
      .build()
      .map_err(to_napi_error)?;

    Ok(GroupIconsPlugin {
      inner,
      host: DeferredHost::default(),
      runtime: Arc::new(runtime),
    })
  }

  #[napi(getter)]
  pub fn name(&self) -> String {
    GroupIconPlugin::NAME.to_string()
  }

  #[napi]
  pub fn resolve_id(&self, id: String) -> Option<String> {
    self.inner.resolve_id(&id).map(str::to_string)
  }

  /// Called once the dev server exists. From then on `transform` reports the
  /// modules to invalidate and reload.
  #[napi]
  pub fn configure_server(&mut self) {
    self.inner.configure_server(Box::new(self.host.clone()));
  }

  /// Collect labels from a document. Returns the module ids the dev server
  /// should invalidate and reload, usually none.
  #[napi]
  pub fn transform(&mut self, code: String, id: String) -> Vec<String> {
    self.inner.transform(&code, &id);
    self.host.pending.borrow_mut().drain(..).collect()
  }

  /// Resolves to the stylesheet for the virtual module id and to `null` for
  /// anything else. Labels are snapshotted before this returns.
  #[napi(ts_return_type = "Promise<string | null>")]
  pub fn load(&mut self, id: String) -> AsyncTask<LoadStylesheet> {
    AsyncTask::new(LoadStylesheet {
      job: self.inner.begin_load(&id),
      runtime: Arc::clone(&self.runtime),
    })
  }
}

pub struct LoadStylesheet {
  job: Option<StylesheetJob>,
  runtime: Arc<Runtime>,
}

impl Task for LoadStylesheet {
  type Output = Option<String>;
  type JsValue = Option<String>;

  fn compute(&mut self) -> Result<Self::Output> {
    let Some(job) = self.job.take() else {
      return Ok(None);
    };
    Ok(Some(self.runtime.block_on(job.run())))
  }

  fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
    Ok(output)
  }
}

#[napi(object)]
pub struct JsToken {
  #[napi(js_name = "type")]
  pub kind: String,
  pub info: String,
  /// A path string or `[path, region]`; only truthiness matters.
  pub src: Option<serde_json::Value>,
}

impl From<JsToken> for markdown::Token {
  fn from(token: JsToken) -> Self {
    markdown::Token::new(markdown::TokenKind::from_type(&token.kind), token.info)
      .with_src_value(token.src.as_ref())
  }
}

/// Wraps the `container_code-group_open` renderer output.
#[napi]
pub fn rewrite_code_group_labels(html: String) -> String {
  markdown::rewrite_code_group_labels(&html)
}

/// Wraps the `fence` renderer output. `rendered` is the default rule's result
/// for `tokens[idx]`.
#[napi]
pub fn render_fence(
  tokens: Vec<JsToken>,
  idx: u32,
  rendered: String,
  include_snippet: Option<bool>,
) -> String {
  let tokens: Vec<markdown::Token> = tokens.into_iter().map(Into::into).collect();
  let options = TitleBarOptions {
    include_snippet: include_snippet.unwrap_or(false),
  };
  markdown::render_fence(&tokens, idx as usize, &rendered, &options)
}
