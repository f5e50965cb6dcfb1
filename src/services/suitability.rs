//! Suitability letter workflow: validation, preview and generation.

use std::path::Path;

use chrono::NaiveDateTime;
use tokio_util::sync::CancellationToken;

use crate::domain::suitability::SuitabilityFormState;
use crate::dto::suitability::{LetterDelivery, ValidationReport};
use crate::files::{Capabilities, DialogHost, FileSystem};
use crate::forms::suitability::{SuitabilityWorkspace, has_errors, validate_form};
use crate::letter::layout::compose;
use crate::letter::pdf::LetterRenderer;
use crate::letter::preview::render_preview;
use crate::letter::{FirmProfile, file_name};
use crate::models::config::Platform;
use crate::services::{ServiceError, ServiceResult};

pub const OVERWRITE_TITLE: &str = "File Already Exists";

fn overwrite_prompt(file_name: &str) -> String {
    format!("A file named \"{file_name}\" already exists.\n\nDo you want to replace it?")
}

fn ensure_active(token: &CancellationToken) -> ServiceResult<()> {
    if token.is_cancelled() {
        log::info!("Letter generation cancelled");
        return Err(ServiceError::Cancelled);
    }
    Ok(())
}

/// Validates the form the way the editor does before saving.
pub fn validate_suitability(form: SuitabilityFormState) -> ValidationReport {
    let mut workspace = SuitabilityWorkspace::from_form(form);
    let valid = workspace.validate_before_save();
    ValidationReport {
        valid,
        page: workspace.page(),
        errors: workspace.errors().clone(),
    }
}

/// Renders the HTML preview. Incomplete forms are previewed with placeholders.
pub fn preview_letter(form: &SuitabilityFormState, firm: &FirmProfile) -> ServiceResult<String> {
    render_preview(form, firm).map_err(|err| {
        log::error!("Failed to render letter preview: {err}");
        ServiceError::from(err)
    })
}

/// Validates, renders and delivers a letter issued at `issued_at`.
///
/// On the web platform the bytes are returned for download. On the desktop
/// they are written to the letters folder; an existing file is only replaced
/// after `dialog` confirms. `token` is checked between steps and nothing is
/// written once it is cancelled.
pub fn generate_letter(
    caps: &Capabilities,
    renderer: &dyn LetterRenderer,
    dialog: &dyn DialogHost,
    firm: &FirmProfile,
    form: &SuitabilityFormState,
    issued_at: NaiveDateTime,
    token: &CancellationToken,
) -> ServiceResult<LetterDelivery> {
    let errors = validate_form(form);
    if has_errors(&errors) {
        return Err(ServiceError::Validation(Box::new(errors)));
    }
    ensure_active(token)?;

    let layout = compose(form, firm, issued_at);
    let bytes = renderer.render(&layout).map_err(|err| {
        log::error!("Failed to render letter: {err}");
        err
    })?;
    ensure_active(token)?;

    let file_name = file_name(form, issued_at.date());

    match caps.platform {
        Platform::Web => Ok(LetterDelivery::Download { file_name, bytes }),
        Platform::Desktop => save_letter(
            caps.files.as_ref(),
            dialog,
            &caps.letters_folder,
            file_name,
            &bytes,
            token,
        ),
    }
}

fn save_letter(
    files: &dyn FileSystem,
    dialog: &dyn DialogHost,
    folder: &Path,
    file_name: String,
    bytes: &[u8],
    token: &CancellationToken,
) -> ServiceResult<LetterDelivery> {
    if !files.exists(folder)? {
        files.create_dir_all(folder)?;
    }

    let relative = folder.join(&file_name);
    if files.exists(&relative)? {
        let prompt = overwrite_prompt(&file_name);
        if !dialog.confirm(OVERWRITE_TITLE, &prompt) {
            log::info!("Kept existing letter {file_name}");
            return Err(ServiceError::Declined(prompt));
        }
    }
    ensure_active(token)?;

    files.write(&relative, bytes).map_err(|err| {
        log::error!("Failed to write letter {file_name}: {err}");
        err
    })?;
    let path = files.resolve(&relative)?;
    log::info!("Letter saved to {}", path.display());

    Ok(LetterDelivery::Saved { file_name, path })
}
