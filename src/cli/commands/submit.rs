use crate::cli::parser::Commands;
use crate::core::access::AccessLayer;
use crate::core::capture::{acquire_location, read_photo};
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::UserRole;
use crate::models::submission::KNOWN_SERVICES;
use crate::screens::FieldWorkerForm;
use crate::store::RecordStore;
use crate::ui::messages::{error, info, screen_header, success, warning};
use crate::utils::path::expand_tilde;

/// File a new service request from the command line.
pub async fn handle<S: RecordStore>(
    cmd: &Commands,
    session: &Session,
    access: &AccessLayer<S>,
) -> AppResult<()> {
    let Commands::Submit {
        photo,
        lat,
        lng,
        service,
        name,
    } = cmd
    else {
        return Ok(());
    };

    session.require(UserRole::FieldWorker)?;
    screen_header(session.screen().title(), &session.username);

    let mut form = FieldWorkerForm::new(session);
    if let Some(n) = name {
        form.set_name(n.as_str());
    }
    if !KNOWN_SERVICES.contains(&service.as_str()) {
        warning(format!(
            "'{}' is not one of {}; sending it as typed",
            service,
            KNOWN_SERVICES.join(", ")
        ));
    }
    form.set_service(service.as_str());

    //
    // 1️⃣ foto e posizione: indipendenti, in parallelo
    //
    let photo_path = expand_tilde(photo);
    let (photo_payload, location) = tokio::join!(read_photo(&photo_path), acquire_location(*lat, *lng));

    form.set_location(location);
    match photo_payload {
        Ok(payload) => form.attach_photo(payload),
        Err(e) => error(format!("Photo not attached: {}", e)),
    }

    if let Some(reason) = &form.location_error {
        error(format!("Location: {}", reason));
    }

    //
    // 2️⃣ invio
    //
    info("Sending request…");
    let created = form.submit(access).await?;

    success(format!(
        "Request #{} ({}) sent to the inspector at {}",
        created.id, created.service, created.captured_at
    ));
    Ok(())
}
