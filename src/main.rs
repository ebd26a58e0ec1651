use clap::Parser;
use color_eyre::Result;
use inline_diary::cli::Cli;
use inline_diary::ui::{Action, UI};
use inline_diary::{logging, Config, DiaryState};
use tracing::info;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.apply_overrides(Config::load(cli.config.as_deref())?);
    let _log_guard = logging::init(&config.log_dir, &config.log_filter)?;

    let mut diary_state = DiaryState::with_id_policy(config.id_policy);
    info!(id_policy = ?diary_state.id_policy(), "starting diary");
    let mut ui = UI::new()?;

    loop {
        let snapshot = diary_state.snapshot();
        ui.display(&snapshot)?;

        if let Some(action) = ui.handle_input(&snapshot)? {
            match action {
                Action::OpenDialog => diary_state.open_dialog(),
                Action::CancelDialog => diary_state.cancel_dialog(),
                Action::DraftTitle(title) => diary_state.set_draft_title(title),
                Action::DraftBody(body) => diary_state.set_draft_body(body),
                // a rejected add leaves the dialog open with its drafts
                Action::Add => {
                    let _ = diary_state.confirm_dialog();
                }
                Action::BeginEdit(row) => diary_state.begin_edit_at(row),
                Action::CommitEdit { row, title, body } => {
                    diary_state.commit_edit_at(row, &title, &body)
                }
                Action::Delete(id) => {
                    diary_state.delete_entry(id);
                }
                Action::Quit => break,
            }
        }
    }

    info!(entries = diary_state.get_entries().len(), "diary closed");
    Ok(())
}
