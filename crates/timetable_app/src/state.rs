//! Toolkit-independent state behind the timetable form.
//!
//! The egui layer only reads this state and forwards clicks; every store
//! access happens here so it can be exercised without a window.

use log::{error, info, warn};
use rand::Rng;
use rusqlite::Connection;
use timetable_core::{
    GenerateOutcome, ScheduleConfig, ScheduleService, ServiceResult, SqliteScheduleRepository,
    TimetableView, NO_CLASS_SELECTED_MESSAGE,
};

#[derive(Debug, Default)]
pub struct FormState {
    selected_class: Option<String>,
    view: Option<TimetableView>,
    status: Option<String>,
}

impl FormState {
    pub fn selected_class(&self) -> Option<&str> {
        self.selected_class.as_deref()
    }

    pub fn view(&self) -> Option<&TimetableView> {
        self.view.as_ref()
    }

    /// Last diagnostic or confirmation shown under the controls.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Selects `class_name` and shows whatever is already stored for it.
    ///
    /// A failed load clears the grid so no other class's rows stay on screen.
    pub fn select(&mut self, conn: &mut Connection, config: &ScheduleConfig, class_name: String) {
        let loaded = with_service(conn, config, |service| service.view_for_class(&class_name));
        match loaded {
            Ok(view) => {
                self.view = Some(view);
                self.status = None;
            }
            Err(err) => self.report_failure("schedule_load", &err.to_string()),
        }
        self.selected_class = Some(class_name);
    }

    /// Selects the first class, in selector order, that already has a stored
    /// timetable. Leaves the form blank when none has.
    pub fn restore(&mut self, conn: &mut Connection, config: &ScheduleConfig) {
        let stored = match with_service(conn, config, |service| service.stored_classes()) {
            Ok(stored) => stored,
            Err(err) => {
                self.report_failure("schedule_restore", &err.to_string());
                return;
            }
        };
        let Some(class_name) = config
            .class_names()
            .iter()
            .find(|name| stored.contains(*name))
            .cloned()
        else {
            return;
        };
        info!("event=schedule_restore module=app status=ok class={class_name}");
        self.select(conn, config, class_name);
    }

    /// Handles the "Generate Timetable" action.
    ///
    /// Without a selection this only sets the status line. Storage errors end
    /// the action, are reported the same way, and clear the grid since the
    /// store may already hold rows the view no longer matches.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        conn: &mut Connection,
        config: &ScheduleConfig,
        rng: &mut R,
    ) {
        let selected = self.selected_class.clone();
        let result = with_service(conn, config, |service| {
            service.generate_for_class(selected.as_deref(), rng)
        });

        match result {
            Ok(GenerateOutcome::NoClassSelected) => {
                warn!("event=generate_click module=app status=skip reason=no_class_selected");
                self.status = Some(NO_CLASS_SELECTED_MESSAGE.to_string());
            }
            Ok(GenerateOutcome::Generated { rows_written, view }) => {
                self.status = Some(format!(
                    "Generated {rows_written} periods for {}.",
                    view.class_name
                ));
                self.view = Some(view);
            }
            Err(err) => self.report_failure("timetable_generate", &err.to_string()),
        }
    }

    fn report_failure(&mut self, event: &str, message: &str) {
        error!("event={event} module=app status=error error={message}");
        self.view = None;
        self.status = Some(format!("Error: {message}"));
    }
}

fn with_service<T, F>(conn: &mut Connection, config: &ScheduleConfig, action: F) -> ServiceResult<T>
where
    F: FnOnce(&mut ScheduleService<'_, SqliteScheduleRepository<'_>>) -> ServiceResult<T>,
{
    let repo = SqliteScheduleRepository::try_new(conn)?;
    let mut service = ScheduleService::new(repo, config);
    action(&mut service)
}

#[cfg(test)]
mod tests {
    use super::FormState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rusqlite::Connection;
    use timetable_core::db::open_db_in_memory;
    use timetable_core::{ScheduleConfig, EMPTY_CELL, NO_CLASS_SELECTED_MESSAGE};

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM timetable;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn generate_without_selection_reports_and_writes_nothing() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.generate(&mut conn, &config, &mut StdRng::seed_from_u64(1));

        assert_eq!(form.status(), Some(NO_CLASS_SELECTED_MESSAGE));
        assert!(form.view().is_none());
        assert_eq!(row_count(&conn), 0);
    }

    #[test]
    fn select_then_generate_shows_persisted_grid() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.select(&mut conn, &config, "Class 11".to_string());
        let empty = form.view().unwrap();
        assert!(empty.rows.iter().flat_map(|row| &row.cells).all(|c| c == EMPTY_CELL));

        form.generate(&mut conn, &config, &mut StdRng::seed_from_u64(2));

        let view = form.view().unwrap();
        assert_eq!(view.class_name, "Class 11");
        assert_eq!(view.filled_slots(), 40);
        assert_eq!(form.status(), Some("Generated 40 periods for Class 11."));
        assert_eq!(row_count(&conn), 40);
    }

    #[test]
    fn switching_class_shows_that_class_rows_only() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.select(&mut conn, &config, "Class 12".to_string());
        form.generate(&mut conn, &config, &mut StdRng::seed_from_u64(3));
        form.select(&mut conn, &config, "Class 10".to_string());

        assert_eq!(form.selected_class(), Some("Class 10"));
        assert_eq!(form.view().unwrap().filled_slots(), 0);
    }

    #[test]
    fn failed_class_switch_clears_previous_grid() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.select(&mut conn, &config, "Class 12".to_string());
        form.generate(&mut conn, &config, &mut StdRng::seed_from_u64(5));
        conn.execute_batch("DROP TABLE timetable;").unwrap();
        form.select(&mut conn, &config, "Class 10".to_string());

        assert_eq!(form.selected_class(), Some("Class 10"));
        assert!(form.view().is_none());
        assert!(form.status().unwrap().starts_with("Error:"));
    }

    #[test]
    fn failed_generate_reports_error_and_shows_no_grid() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.select(&mut conn, &config, "Class 11".to_string());
        conn.execute_batch(
            "CREATE TRIGGER reject_timetable_insert BEFORE INSERT ON timetable
             BEGIN
                 SELECT RAISE(ABORT, 'disk full');
             END;",
        )
        .unwrap();
        form.generate(&mut conn, &config, &mut StdRng::seed_from_u64(6));

        let status = form.status().unwrap();
        assert!(status.starts_with("Error:"), "{status}");
        assert!(status.contains("disk full"));
        assert!(form.view().is_none());
        assert_eq!(row_count(&conn), 0);
    }

    #[test]
    fn restore_selects_first_stored_class_in_selector_order() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        {
            let mut earlier = FormState::default();
            earlier.select(&mut conn, &config, "Class 10".to_string());
            earlier.generate(&mut conn, &config, &mut StdRng::seed_from_u64(7));
            earlier.select(&mut conn, &config, "Class 11".to_string());
            earlier.generate(&mut conn, &config, &mut StdRng::seed_from_u64(8));
        }

        let mut form = FormState::default();
        form.restore(&mut conn, &config);

        assert_eq!(form.selected_class(), Some("Class 11"));
        let view = form.view().unwrap();
        assert_eq!(view.class_name, "Class 11");
        assert_eq!(view.filled_slots(), 40);
        assert!(form.status().is_none());
    }

    #[test]
    fn restore_on_empty_store_leaves_form_blank() {
        let mut conn = open_db_in_memory().unwrap();
        let config = ScheduleConfig::standard();
        let mut form = FormState::default();

        form.restore(&mut conn, &config);

        assert!(form.selected_class().is_none());
        assert!(form.view().is_none());
        assert!(form.status().is_none());
    }
}
