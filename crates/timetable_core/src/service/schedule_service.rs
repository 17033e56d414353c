//! Schedule use-case service.
//!
//! # Responsibility
//! - Turn a class selection into a persisted, freshly rendered timetable.
//! - Treat a missing selection as a reported no-op.
//!
//! # Invariants
//! - With no class selected the repository is not called at all.
//! - The returned view is built from rows read back from the store, never
//!   from the in-memory grid.

use crate::config::ScheduleConfig;
use crate::generator::{GenerateError, TimetableGenerator};
use crate::repo::schedule_repo::{RepoError, ScheduleRepository};
use crate::view::TimetableView;
use log::{info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Diagnostic shown when generation is requested without a class.
pub const NO_CLASS_SELECTED_MESSAGE: &str =
    "Please select a class before generating the timetable.";

pub type ServiceResult<T> = Result<T, ScheduleServiceError>;

#[derive(Debug)]
pub enum ScheduleServiceError {
    Generate(GenerateError),
    Repo(RepoError),
}

impl Display for ScheduleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generate(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Generate(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<GenerateError> for ScheduleServiceError {
    fn from(value: GenerateError) -> Self {
        Self::Generate(value)
    }
}

impl From<RepoError> for ScheduleServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Result of one "Generate Timetable" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Nothing was generated or written.
    NoClassSelected,
    Generated {
        rows_written: usize,
        view: TimetableView,
    },
}

/// Use-case service over a schedule repository and a fixed configuration.
pub struct ScheduleService<'cfg, R: ScheduleRepository> {
    repo: R,
    config: &'cfg ScheduleConfig,
}

impl<'cfg, R: ScheduleRepository> ScheduleService<'cfg, R> {
    pub fn new(repo: R, config: &'cfg ScheduleConfig) -> Self {
        Self { repo, config }
    }

    /// Generates, persists and re-reads the timetable for `selected_class`.
    ///
    /// # Contract
    /// - `None` or a blank selection returns `NoClassSelected` and leaves the
    ///   store untouched.
    /// - Otherwise the class's rows are replaced in full and the returned
    ///   view reflects what the store now holds.
    pub fn generate_for_class<G: Rng + ?Sized>(
        &mut self,
        selected_class: Option<&str>,
        rng: &mut G,
    ) -> ServiceResult<GenerateOutcome> {
        let Some(class_name) = selected_class.map(str::trim).filter(|name| !name.is_empty())
        else {
            warn!("event=timetable_generate module=service status=skip reason=no_class_selected");
            return Ok(GenerateOutcome::NoClassSelected);
        };

        let grid = TimetableGenerator::new(self.config).generate(rng)?;
        let rows_written = self.repo.replace_class_schedule(class_name, &grid)?;
        let view = self.view_for_class(class_name)?;

        info!(
            "event=timetable_generate module=service status=ok class={class_name} rows={rows_written}"
        );
        Ok(GenerateOutcome::Generated { rows_written, view })
    }

    /// Renders whatever the store currently holds for `class_name`.
    pub fn view_for_class(&self, class_name: &str) -> ServiceResult<TimetableView> {
        let rows = self.repo.load_class_schedule(class_name)?;
        Ok(TimetableView::from_rows(
            class_name,
            self.config.days(),
            self.config.periods_per_day(),
            rows,
        ))
    }

    /// Classes with a stored timetable, sorted ascending.
    pub fn stored_classes(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.list_classes()?)
    }
}
