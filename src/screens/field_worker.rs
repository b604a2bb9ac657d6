use crate::core::access::AccessLayer;
use crate::core::session::Session;
use crate::errors::{AppError, AppResult};
use crate::models::submission::DEFAULT_SERVICE;
use crate::models::{GeoPoint, NewSubmission, Submission};
use crate::store::RecordStore;
use crate::utils::date::display_now;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Success,
    Error,
}

/// New-request form filled in by the field worker.
#[derive(Debug, Clone)]
pub struct FieldWorkerForm {
    pub name: String,
    pub location: Option<GeoPoint>,
    pub location_error: Option<String>,
    pub captured_at: String,
    pub service: String,
    pub photo: Option<String>,
    pub status: SubmitStatus,
    pub loading: bool,
}

impl FieldWorkerForm {
    pub fn new(session: &Session) -> Self {
        Self {
            name: session.username.clone(),
            location: None,
            location_error: None,
            captured_at: display_now(),
            service: DEFAULT_SERVICE.to_string(),
            photo: None,
            status: SubmitStatus::Idle,
            loading: false,
        }
    }

    /// Store the outcome of the geolocation request.
    pub fn set_location(&mut self, reading: Result<GeoPoint, String>) {
        match reading {
            Ok(point) => {
                self.location = Some(point);
                self.location_error = None;
            }
            Err(reason) => {
                tracing::warn!(%reason, "geolocation failed");
                self.location_error = Some(reason);
            }
        }
    }

    pub fn attach_photo(&mut self, payload: String) {
        self.photo = Some(payload);
    }

    pub fn set_service(&mut self, service: impl Into<String>) {
        self.service = service.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Names of the required fields still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.location.is_none() {
            missing.push("location");
        }
        if self.photo.is_none() {
            missing.push("photo");
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.missing_fields().is_empty()
    }

    /// Send the form.
    ///
    /// Incomplete forms never reach the access layer. After a failed call
    /// every field is kept except the photo, which has to be attached again.
    pub async fn submit<S: RecordStore>(
        &mut self,
        access: &AccessLayer<S>,
    ) -> AppResult<Submission> {
        let missing = self.missing_fields();
        let (Some(location), Some(photo), true) =
            (self.location, self.photo.clone(), missing.is_empty())
        else {
            self.status = SubmitStatus::Error;
            return Err(AppError::Validation(missing.join(", ")));
        };

        self.loading = true;
        self.status = SubmitStatus::Idle;
        self.captured_at = display_now();

        let new = NewSubmission {
            name: self.name.trim().to_string(),
            location: Some(location),
            captured_at: self.captured_at.clone(),
            service: self.service.clone(),
            initial_photo: photo,
        };

        let outcome = access.create_submission(new).await;
        self.loading = false;

        match outcome {
            Ok(created) => {
                self.status = SubmitStatus::Success;
                self.reset();
                Ok(created)
            }
            Err(e) => {
                self.status = SubmitStatus::Error;
                self.photo = None;
                Err(e)
            }
        }
    }

    /// Ready for the next request: the name stays, the rest starts over.
    fn reset(&mut self) {
        self.service = DEFAULT_SERVICE.to_string();
        self.photo = None;
    }
}
