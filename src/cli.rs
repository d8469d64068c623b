//! 端末フロントエンド
//!
//! # 責務
//!
//! - コマンドライン引数の定義（`clap`）
//! - 標準入出力上での対話ウィザードと、保存済みワークフロー一覧の表示
//!
//! 対話ループは [`Console`] 経由で任意の非同期リーダー/ライターに対して動作するため、
//! テストではメモリ上のバッファを使います。

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::config::AppConfig;
use crate::error::{CliError, WizardError};
use crate::history::HistoryViewer;
use crate::logging::init_logging;
use crate::service::create_service;
use crate::wizard::{Completion, LoggingObserver, Progress, WizardController};

/// アイデアを質問への回答で具体化し、ワークフローとして保存するクライアント
#[derive(Debug, Parser)]
#[command(name = "flowcraft", version)]
pub struct Cli {
    /// 設定ファイルのパス（省略時は ./flowcraft.toml を探索）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session Service のベース URL（設定ファイル・API_BASE_URL より優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// debug レベルでログを出力
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 対話形式でアイデアを入力し、質問に順に回答する
    Start {
        /// 最初のアイデア（省略時はプロンプトで入力）
        #[arg(long)]
        idea: Option<String>,

        /// 完了結果を JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// 保存済みワークフローを一覧表示する
    History,
    /// Session Service のウェルカムメッセージを表示する
    Ping,
}

/// 行単位の対話入出力
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// ラベルを表示して 1 行読む（末尾の改行は除く）
    ///
    /// 入力が閉じられていれば [`CliError::InputClosed`]。
    pub async fn prompt(&mut self, label: &str) -> Result<String, CliError> {
        self.writer.write_all(label.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(CliError::InputClosed);
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub async fn say(&mut self, text: &str) -> Result<(), CliError> {
        self.writer.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }
}

/// ウィザードを完了まで対話的に進める
///
/// - アイデアが空、または開始に失敗した場合はアイデアを再入力
/// - 回答が空の場合は送信せずに同じ質問を再表示
/// - 回答の送信に失敗した場合はエラーを表示し、同じ質問への回答を再入力（自動リトライなし）
pub async fn run_wizard<R, W>(
    wizard: &WizardController,
    console: &mut Console<R, W>,
    idea: Option<String>,
) -> Result<Completion, CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut preset = idea;

    let mut question = loop {
        let idea = match preset.take() {
            Some(idea) => idea,
            None => console.prompt("Enter your idea: ").await?,
        };

        match wizard.start(&idea).await {
            Ok(question) => break question,
            Err(WizardError::EmptyIdea) => console.say("Please describe your idea.").await?,
            Err(WizardError::Service(e)) => console.say(&format!("Error: {}", e)).await?,
            Err(other) => return Err(other.into()),
        }
    };

    loop {
        console.say(&question).await?;
        let answer = console.prompt("> ").await?;

        match wizard.submit_answer(answer).await {
            Ok(Progress::Next(next)) => question = next,
            Ok(Progress::Completed(completion)) => return Ok(completion),
            Err(e @ WizardError::EmptyAnswer) => console.say(&e.to_string()).await?,
            Err(WizardError::Service(e)) => console.say(&format!("Error: {}", e)).await?,
            Err(other) => return Err(other.into()),
        }
    }
}

/// 完了結果のテキスト表示
pub fn render_completion(completion: &Completion) -> String {
    let mut out = format!("Idea: {}\n", completion.idea);
    for (i, answer) in completion.answers.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, answer));
    }
    out
}

/// 引数に従ってサブコマンドを実行する
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    let _logging = init_logging(config.logging(), cli.debug)?;
    tracing::debug!(base_url = %config.service().base_url(), "configuration loaded");

    let service = create_service(config.service())?;
    let mut console = Console::stdio();

    match cli.command {
        Command::Start { idea, json } => {
            let wizard = WizardController::new(service, Arc::new(LoggingObserver));
            let completion = run_wizard(&wizard, &mut console, idea).await?;

            let output = if json {
                serde_json::to_string_pretty(&completion)?
            } else {
                render_completion(&completion)
            };
            console.say(&output).await?;
        }
        Command::History => {
            let mut viewer = HistoryViewer::new(service);
            viewer.load().await;
            console.say(&viewer.render()).await?;

            if let Some(error) = viewer.last_error() {
                eprintln!("note: saved workflows could not be loaded: {}", error);
            }
        }
        Command::Ping => {
            let message = service.welcome().await?;
            console.say(&message).await?;
        }
    }

    Ok(())
}
