//! FlowCraft クライアント
//!
//! アイデアを入力し、Session Service が生成する質問に順に回答してワークフローを具体化します。
//!
//! # モジュール構成
//!
//! - [`config`][]: 設定ファイルと環境変数の読み込み
//! - [`service`][]: Session Service の HTTP クライアント
//! - [`wizard`][]: 質問・回答セッションの状態遷移
//! - [`history`][]: 保存済みワークフロー一覧
//! - [`logging`][]: `tracing` サブスクライバーの初期化
//! - [`cli`][]: 端末フロントエンド

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod service;
pub mod wizard;
