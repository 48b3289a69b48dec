//! # Command Line
//!
//! One subcommand per backend action. Every run builds a fresh request and a
//! fresh controller, so the command itself plays the part of the trigger:
//!
//! ```text
//! Command ──→ gate? ──→ AsyncActionController ──→ ConsoleHooks ──→ stdout / stderr
//! ```

pub mod export;
pub mod hooks;
pub mod prompt;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::Subcommand;
use log::{info, warn};
use serde_json::Value;

use crate::api::endpoints;
use crate::api::{ModelKind, Transport};
use crate::core::config::ResolvedConfig;
use crate::core::confirm::Confirmer;
use crate::core::controller::{AsyncActionController, fire_and_forget};
use crate::core::outcome::Payload;
use crate::core::request::ActionRequest;
use crate::core::validate::{self, Report};
use crate::insights::learning_path::PathProgress;
use crate::insights::text::{
    self as render, CLEAR_HISTORY, DELETE_ACCOUNT, ENGAGEMENT, EXPORT, LEARNING_STYLE, PERFORMANCE,
    Rendered, STYLE_CHART, TRAIN, Wording,
};
use crate::insights::training::{TICK, TrainingProgress};

use hooks::ConsoleHooks;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Record an interaction with a content item (failures are only logged)
    LogInteraction {
        content_id: String,
        /// Interaction type
        #[arg(long = "type", default_value = "view_adapted_content")]
        kind: String,
        /// Extra details as a JSON object
        #[arg(long)]
        details: Option<String>,
    },
    /// Retrain AI models (admin only)
    Train {
        /// Models to train; defaults to all
        #[arg(value_enum)]
        models: Vec<ModelKind>,
        /// Skip the progress animation
        #[arg(long)]
        no_progress: bool,
    },
    /// Show the predicted assessment performance
    Performance,
    /// Show the detected learning style
    LearningStyle,
    /// Show disengagement risk and suggestions
    Engagement,
    /// Performance, learning style and engagement side by side
    Insights,
    /// Download all your learning data
    Export {
        /// Directory to save my-learning-data.json in
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Clear your learning history (asks first)
    ClearHistory,
    /// Permanently delete your account (asks you to type DELETE)
    DeleteAccount,
    /// Draw the learning path strip
    Path {
        /// Progress label such as "Progress: 3 / 8"
        #[arg(long)]
        label: Option<String>,
    },
}

/// Everything a command needs from the outside world.
pub struct CommandContext<'a> {
    pub config: &'a ResolvedConfig,
    pub transport: Arc<dyn Transport>,
    pub confirmer: &'a mut dyn Confirmer,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    /// Show busy lines and the training animation on stderr.
    pub interactive: bool,
}

/// Busy lines go to stderr only when a person is watching.
fn status_stream(interactive: bool) -> Box<dyn Write + Send> {
    if interactive {
        Box::new(io::stderr())
    } else {
        Box::new(io::sink())
    }
}

/// The buffered outcome of one or more requests, written out once settled.
struct Section {
    ok: bool,
    output: Vec<String>,
    errors: Vec<String>,
}

impl Section {
    fn append(&mut self, other: Section) {
        self.ok &= other.ok;
        self.output.extend(other.output);
        self.errors.extend(other.errors);
    }

    fn flush(&self, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<()> {
        for line in &self.output {
            writeln!(out, "{line}")?;
        }
        for line in &self.errors {
            writeln!(err, "{line}")?;
        }
        Ok(())
    }
}

/// Runs one request through a fresh controller, buffering what it shows.
async fn buffered<R>(
    transport: Arc<dyn Transport>,
    label: &str,
    request: ActionRequest,
    wording: Wording,
    render: R,
    status: Box<dyn Write + Send>,
) -> Section
where
    R: FnMut(&Payload) -> Rendered + Send,
{
    let controller = AsyncActionController::new(label, transport);
    let mut hooks = ConsoleHooks::new(wording, render, status);
    let triggered = controller.trigger(request, &mut hooks).await;
    Section {
        ok: !triggered.is_ignored() && !hooks.failed(),
        output: hooks.output,
        errors: hooks.errors,
    }
}

/// Style first; the chart is only requested once there is enough data.
async fn style_section(transport: Arc<dyn Transport>, interactive: bool) -> Section {
    let mut profile = None;
    let mut section = buffered(
        transport.clone(),
        "learning-style",
        endpoints::learning_style(),
        LEARNING_STYLE,
        |p: &Payload| {
            let (found, lines) = render::learning_style(p)?;
            profile = found;
            Ok(lines)
        },
        status_stream(interactive),
    )
    .await;
    if section.ok && profile.is_some() {
        let chart = buffered(
            transport,
            "learning-style-chart",
            endpoints::learning_style_visualization(),
            STYLE_CHART,
            render::style_visualization,
            status_stream(interactive),
        )
        .await;
        section.append(chart);
    }
    section
}

impl CommandContext<'_> {
    /// Runs one request through a fresh controller and writes the result.
    /// Returns whether it succeeded.
    async fn run_action<R>(
        &mut self,
        label: &str,
        request: ActionRequest,
        wording: Wording,
        render: R,
    ) -> io::Result<bool>
    where
        R: FnMut(&Payload) -> Rendered + Send,
    {
        let status = status_stream(self.interactive);
        let section = buffered(self.transport.clone(), label, request, wording, render, status).await;
        section.flush(self.out, self.err)?;
        Ok(section.ok)
    }
}

/// Runs `command`. `Ok(false)` means the action failed and was reported.
pub async fn execute(command: Command, ctx: &mut CommandContext<'_>) -> io::Result<bool> {
    info!("Running {:?}", command);
    match command {
        Command::LogInteraction {
            content_id,
            kind,
            details,
        } => {
            let mut report = Report::default();
            report
                .check("content_id", validate::required(&content_id))
                .check("type", validate::required(&kind));
            if !report.is_valid() {
                for line in report.lines() {
                    writeln!(ctx.err, "{line}")?;
                }
                return Ok(false);
            }
            let details = match details {
                None => endpoints::adapted_view_details(),
                Some(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(Value::Object(map)) => map,
                    _ => {
                        writeln!(ctx.err, "--details must be a JSON object")?;
                        return Ok(false);
                    }
                },
            };
            let request = endpoints::log_interaction(&content_id, &kind, details, Utc::now());
            if let Err(e) = fire_and_forget(ctx.transport.clone(), request).await {
                warn!("interaction log task failed: {}", e);
            }
            Ok(true)
        }
        Command::Train { models, no_progress } => {
            let ok = ctx
                .run_action("train", endpoints::train_models(&models), TRAIN, render::training)
                .await?;
            if ok && ctx.interactive && !no_progress {
                animate_training(&mut io::stderr()).await?;
            }
            Ok(ok)
        }
        Command::Performance => {
            ctx.run_action("performance", endpoints::predict_performance(), PERFORMANCE, render::performance)
                .await
        }
        Command::LearningStyle => learning_style(ctx).await,
        Command::Engagement => {
            ctx.run_action("engagement", endpoints::predict_disengagement(), ENGAGEMENT, render::engagement)
                .await
        }
        Command::Insights => insights(ctx).await,
        Command::Export { .. } => {
            let dir = ctx.config.export_dir.clone();
            ctx.run_action("export", endpoints::export_user_data(), EXPORT, move |p: &Payload| {
                export::render(&dir, p)
            })
            .await
        }
        Command::ClearHistory => {
            let Some(request) = endpoints::clear_learning_history().confirm(ctx.confirmer) else {
                writeln!(ctx.err, "Nothing was changed.")?;
                return Ok(true);
            };
            ctx.run_action("clear-history", request, CLEAR_HISTORY, render::history_cleared)
                .await
        }
        Command::DeleteAccount => {
            let Some(request) = endpoints::delete_account().confirm(ctx.confirmer) else {
                writeln!(ctx.err, "Account not deleted.")?;
                return Ok(true);
            };
            ctx.run_action("delete-account", request, DELETE_ACCOUNT, render::account_deleted)
                .await
        }
        Command::Path { label } => {
            let progress = label
                .as_deref()
                .or(ctx.config.learning_path.as_deref())
                .map(PathProgress::parse)
                .unwrap_or_default();
            writeln!(ctx.out, "Progress: {} / {}", progress.current, progress.total)?;
            writeln!(ctx.out, "{}", progress.layout().strip())?;
            Ok(true)
        }
    }
}

async fn learning_style(ctx: &mut CommandContext<'_>) -> io::Result<bool> {
    let section = style_section(ctx.transport.clone(), ctx.interactive).await;
    section.flush(ctx.out, ctx.err)?;
    Ok(section.ok)
}

/// Independent controllers, so the three panels load concurrently.
async fn insights(ctx: &mut CommandContext<'_>) -> io::Result<bool> {
    let transport = &ctx.transport;
    let (performance, style, engagement) = futures::join!(
        buffered(
            transport.clone(),
            "performance",
            endpoints::predict_performance(),
            PERFORMANCE,
            render::performance,
            status_stream(false),
        ),
        style_section(transport.clone(), false),
        buffered(
            transport.clone(),
            "engagement",
            endpoints::predict_disengagement(),
            ENGAGEMENT,
            render::engagement,
            status_stream(false),
        ),
    );

    let mut all_ok = true;
    for (title, section) in [
        ("AI Performance Prediction", performance),
        ("Your Learning Style Profile", style),
        ("Learning Engagement Insights", engagement),
    ] {
        writeln!(ctx.out, "== {title} ==")?;
        section.flush(ctx.out, ctx.err)?;
        all_ok &= section.ok;
    }
    Ok(all_ok)
}

/// Plays the training animation on `out` until it reports completion.
async fn animate_training(out: &mut dyn Write) -> io::Result<()> {
    let mut progress = TrainingProgress::default();
    let mut interval = tokio::time::interval(TICK);
    while !progress.is_complete() {
        interval.tick().await;
        progress.tick();
        write!(out, "\r{:>14}  {:<32}", progress.label(), progress.status())?;
        out.flush()?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, LearnConfig, resolve_with_env};
    use crate::test_support::{ScriptedConfirmer, StubTransport};
    use serde_json::json;

    fn config() -> ResolvedConfig {
        resolve_with_env(&LearnConfig::default(), &CliOverrides::default(), |_| None)
    }

    async fn run(command: Command, stub: Arc<StubTransport>, answers: &[&str]) -> (bool, String, String) {
        let config = config();
        let mut confirmer = ScriptedConfirmer::new(answers);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut ctx = CommandContext {
            config: &config,
            transport: stub,
            confirmer: &mut confirmer,
            out: &mut out,
            err: &mut err,
            interactive: false,
        };
        let ok = execute(command, &mut ctx).await.unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[tokio::test]
    async fn test_delete_account_lowercase_sends_nothing() {
        let stub = Arc::new(StubTransport::ok(json!({"status": "success"})));
        let (ok, _, err) = run(Command::DeleteAccount, stub.clone(), &["delete"]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 0);
        assert!(err.contains("Account not deleted."));
    }

    #[tokio::test]
    async fn test_delete_account_exact_phrase_sends_request() {
        let stub = Arc::new(StubTransport::ok(json!({"status": "success"})));
        let (ok, out, _) = run(Command::DeleteAccount, stub.clone(), &["DELETE\n"]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 1);
        assert_eq!(stub.requests()[0].endpoint(), endpoints::DELETE_ACCOUNT);
        assert!(out.contains("deleted successfully"));
    }

    #[tokio::test]
    async fn test_clear_history_declined() {
        let stub = Arc::new(StubTransport::ok(json!({"status": "success"})));
        let (_, _, err) = run(Command::ClearHistory, stub.clone(), &["n"]).await;
        assert_eq!(stub.calls(), 0);
        assert!(err.contains("Nothing was changed."));
    }

    #[tokio::test]
    async fn test_failure_reported_on_stderr() {
        let stub = Arc::new(StubTransport::failing(crate::core::outcome::ActionError::Http {
            status: 500,
            message: String::new(),
            body: None,
        }));
        let (ok, out, err) = run(Command::Performance, stub, &[]).await;
        assert!(!ok);
        assert!(out.is_empty());
        assert!(err.starts_with("Unable to load prediction at this time."));
        assert!(err.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_not_enough_data_reply_is_not_a_failure() {
        let body = json!({
            "error": "Could not generate prediction",
            "message": "Not enough data available or model not trained"
        });
        for (command, first_line) in [
            (Command::Performance, "Not enough data to make a prediction yet."),
            (Command::Engagement, "Not enough data to analyze engagement patterns yet."),
        ] {
            let stub = Arc::new(StubTransport::failing(crate::core::outcome::ActionError::Http {
                status: 500,
                message: "Could not generate prediction".into(),
                body: Some(body.clone()),
            }));
            let (ok, out, err) = run(command, stub, &[]).await;
            assert!(ok);
            assert!(out.starts_with(first_line));
            assert!(err.is_empty());
        }
    }

    #[tokio::test]
    async fn test_learning_style_skips_chart_without_data() {
        let stub = Arc::new(StubTransport::ok(json!({"style": "visual", "enough_data": false})));
        let (ok, out, _) = run(Command::LearningStyle, stub.clone(), &[]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 1);
        assert!(out.contains("still learning"));
    }

    #[tokio::test]
    async fn test_insights_runs_three_requests() {
        let stub = Arc::new(StubTransport::ok(json!({"error": "Could not generate prediction"})));
        let (ok, out, _) = run(Command::Insights, stub.clone(), &[]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 3);
        assert!(out.contains("== AI Performance Prediction =="));
        assert!(out.contains("== Learning Engagement Insights =="));
    }

    #[tokio::test]
    async fn test_insights_fetches_style_chart_like_learning_style() {
        let body = json!({
            "predicted_performance": 0.7,
            "style": "visual",
            "enough_data": true,
            "description": "You learn best by seeing.",
            "visualization": "data:image/png;base64,AA",
            "risk_level": "low"
        });

        let stub = Arc::new(StubTransport::ok(body.clone()));
        let (ok, single, _) = run(Command::LearningStyle, stub.clone(), &[]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 2);

        let stub = Arc::new(StubTransport::ok(body));
        let (ok, out, _) = run(Command::Insights, stub.clone(), &[]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 4);
        assert!(stub.requests().iter().any(|r| r.endpoint() == endpoints::LEARNING_STYLE_VISUALIZATION));

        let style_part = out
            .split("== Your Learning Style Profile ==\n")
            .nth(1)
            .and_then(|rest| rest.split("== ").next())
            .unwrap();
        assert_eq!(style_part, single);
        assert!(style_part.contains("Style chart: image/png"));
    }

    #[tokio::test]
    async fn test_log_interaction_rejects_non_object_details() {
        let stub = Arc::new(StubTransport::ok(json!({})));
        let command = Command::LogInteraction {
            content_id: "7".into(),
            kind: "view".into(),
            details: Some("[1, 2]".into()),
        };
        let (ok, _, err) = run(command, stub.clone(), &[]).await;
        assert!(!ok);
        assert_eq!(stub.calls(), 0);
        assert!(err.contains("JSON object"));
    }

    #[tokio::test]
    async fn test_log_interaction_blank_fields_send_nothing() {
        let stub = Arc::new(StubTransport::ok(json!({})));
        let command = Command::LogInteraction {
            content_id: "   ".into(),
            kind: "".into(),
            details: None,
        };
        let (ok, _, err) = run(command, stub.clone(), &[]).await;
        assert!(!ok);
        assert_eq!(stub.calls(), 0);
        assert_eq!(err, "content_id: This field is required\ntype: This field is required\n");
    }

    #[tokio::test]
    async fn test_log_interaction_failure_not_surfaced() {
        let stub = Arc::new(StubTransport::failing(crate::core::outcome::ActionError::Network(
            "refused".into(),
        )));
        let command = Command::LogInteraction {
            content_id: "7".into(),
            kind: "view_adapted_content".into(),
            details: None,
        };
        let (ok, out, err) = run(command, stub.clone(), &[]).await;
        assert!(ok);
        assert_eq!(stub.calls(), 1);
        assert!(out.is_empty() && err.is_empty());
    }

    #[tokio::test]
    async fn test_path_uses_label() {
        let stub = Arc::new(StubTransport::ok(json!({})));
        let command = Command::Path {
            label: Some("Progress: 1 / 3".into()),
        };
        let (_, out, _) = run(command, stub.clone(), &[]).await;
        assert_eq!(out, "Progress: 1 / 3\n✓───●───○\n");
        assert_eq!(stub.calls(), 0);
    }
}
