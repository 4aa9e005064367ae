//! 桌面端 Tauri 命令。
//! 阻塞操作（网络请求、文件读写）通过 spawn_blocking 在线程池执行，IPC 主线程始终响应；
//! 会话内容只在后台任务成功后写回，失败时保持不变。

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::Deserialize;

use crate::config::AppConfig;
use crate::documents::{self, Conversion, DocFormat};
use crate::generation::{GenerationError, HfClient};
use crate::prompt::PromptForm;
use crate::session::{Content, Session, SessionError};

pub struct DesktopState {
    session: Mutex<Session<HfClient>>,
}

impl DesktopState {
    pub fn new(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = HfClient::new(config)?;
        log::info!("[desktop] model={} endpoint={}", client.model(), client.endpoint());
        Ok(Self {
            session: Mutex::new(Session::new(client).with_max_tokens(config.max_tokens)),
        })
    }

    fn session(&self) -> MutexGuard<'_, Session<HfClient>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn background_error(e: impl std::fmt::Display) -> String {
    format!("Background task failed: {e}")
}

/// 校验表单并生成内容；校验失败时不发起请求
#[tauri::command]
pub async fn generate_content(
    state: tauri::State<'_, DesktopState>,
    form: PromptForm,
) -> Result<Content, String> {
    let pending = state
        .session()
        .prepare_generation(&form)
        .map_err(|e| e.to_string())?;

    let content = tauri::async_runtime::spawn_blocking(move || pending.run())
        .await
        .map_err(background_error)?
        .map_err(|e| e.to_string())?;

    let mut session = state.session();
    Ok(session.replace(content).clone())
}

/// 按目标扩展名保存当前内容，返回写入的路径
#[tauri::command]
pub async fn save_content(
    state: tauri::State<'_, DesktopState>,
    path: String,
) -> Result<String, String> {
    let text = state
        .session()
        .content()
        .map(|c| c.text().to_string())
        .ok_or_else(|| SessionError::NoContent.to_string())?;
    let path = PathBuf::from(path);

    let saved = tauri::async_runtime::spawn_blocking(move || {
        let format = DocFormat::from_path(&path)?;
        documents::write_document(&text, &path, format)
    })
    .await
    .map_err(background_error)?
    .map_err(|e| e.to_string())?;

    log::info!("[desktop] saved {}", saved.display());
    Ok(saved.to_string_lossy().into_owned())
}

/// 读取 TXT / DOCX / PDF，文本成为当前内容
#[tauri::command]
pub async fn upload_file(
    state: tauri::State<'_, DesktopState>,
    path: String,
) -> Result<Content, String> {
    let path = PathBuf::from(path);
    let read_path = path.clone();
    let text = tauri::async_runtime::spawn_blocking(move || documents::read_document(&read_path))
        .await
        .map_err(background_error)?
        .map_err(|e| e.to_string())?;

    let mut session = state.session();
    Ok(session.replace(Content::from_file(text, &path)).clone())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertArgs {
    pub input: String,
    pub output: String,
    /// 例如 "docx-to-pdf"；缺省时按两端扩展名推断
    #[serde(default)]
    pub conversion: Option<String>,
}

/// 格式转换，不影响当前内容
#[tauri::command]
pub async fn convert_file(args: ConvertArgs) -> Result<String, String> {
    let conversion = match args.conversion.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => Some(label.parse::<Conversion>().map_err(|e| e.to_string())?),
        _ => None,
    };
    let input = PathBuf::from(args.input);
    let output = PathBuf::from(args.output);

    let written = tauri::async_runtime::spawn_blocking(move || match conversion {
        Some(conversion) => documents::convert(&input, &output, conversion),
        None => documents::convert_file(&input, &output),
    })
    .await
    .map_err(background_error)?
    .map_err(|e| e.to_string())?;

    log::info!("[desktop] converted into {}", written.display());
    Ok(written.to_string_lossy().into_owned())
}

#[tauri::command]
pub fn current_content(state: tauri::State<'_, DesktopState>) -> Option<Content> {
    state.session().content().cloned()
}
