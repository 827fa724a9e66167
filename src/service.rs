//! The application service: one owner for all engine state.
//!
//! [`AppService`] holds the in-memory snapshot of every collection behind a
//! single `tokio::sync::RwLock` and serializes mutations through it, so two
//! scans against the same employee can never interleave their
//! read-modify-write cycles. Every mutation follows persist-then-commit:
//! the updated collection is written to storage first, and only a
//! successful write swaps it into the snapshot. A failed write therefore
//! leaves memory exactly as it was.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ScanOutcome, compute_payroll, manual_entry, process_scan};
use crate::config::AttendanceSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Branch, CardRecord, Employee, Holiday, PayMonth, PayrollSummary, Role,
    UserAccount,
};
use crate::report::{
    ReportKind, ReportTable, daily_attendance_report, late_report, monthly_attendance_report,
    overtime_report, payroll_report,
};
use crate::store::{KeyValueStore, Repository};

/// The full in-memory snapshot of engine state.
struct AppData {
    employees: Vec<Employee>,
    cards: Vec<CardRecord>,
    attendance: Vec<AttendanceRecord>,
    holidays: Vec<Holiday>,
    branches: Vec<Branch>,
    users: Vec<UserAccount>,
    settings: AttendanceSettings,
}

/// The engine's state container and mutation owner.
///
/// Constructed once with [`AppService::load`]; handlers share it behind an
/// `Arc`. Reads take the lock shared, mutations take it exclusively and
/// hold it across the storage write so call order is preserved.
pub struct AppService {
    repo: Repository,
    data: RwLock<AppData>,
}

impl AppService {
    /// Loads all collections from storage and seeds first-run defaults.
    ///
    /// When no branches exist, a "Main Branch" is created; when no user
    /// accounts exist, the `admin` / `admin123` super admin is created.
    /// Both seeds are persisted immediately.
    ///
    /// # Errors
    ///
    /// Fails when storage reads fail, a stored document has an unexpected
    /// shape, or a seed cannot be persisted.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> EngineResult<Self> {
        let repo = Repository::new(store);
        let data = Self::bootstrap(&repo).await?;
        info!(
            employees = data.employees.len(),
            cards = data.cards.len(),
            attendance = data.attendance.len(),
            "Attendance engine state loaded"
        );
        Ok(AppService {
            repo,
            data: RwLock::new(data),
        })
    }

    /// Reads every collection and seeds the defaults a fresh system needs.
    async fn bootstrap(repo: &Repository) -> EngineResult<AppData> {
        let employees = repo.load_employees().await?;
        let cards = repo.load_cards().await?;
        let attendance = repo.load_attendance().await?;
        let holidays = repo.load_holidays().await?;
        let mut branches = repo.load_branches().await?;
        let mut users = repo.load_users().await?;
        let settings = repo.load_settings().await?;

        if branches.is_empty() {
            branches.push(Branch {
                id: Uuid::new_v4(),
                name: "Main Branch".to_string(),
                address: "HQ".to_string(),
            });
            repo.save_branches(&branches).await?;
            info!("Seeded default branch");
        }
        if users.is_empty() {
            users.push(UserAccount {
                id: Uuid::new_v4(),
                username: "admin".to_string(),
                password: "admin123".to_string(),
                name: "Super Admin".to_string(),
                role: Role::SuperAdmin,
                employee_id: None,
                branch_id: branches.first().map(|b| b.id),
            });
            repo.save_users(&users).await?;
            info!("Seeded default super admin account");
        }

        Ok(AppData {
            employees,
            cards,
            attendance,
            holidays,
            branches,
            users,
            settings,
        })
    }

    // ---- Attendance -----------------------------------------------------

    /// Processes one card scan at the given moment.
    ///
    /// The uid is trimmed and uppercased here, at the boundary. A clock-in
    /// or clock-out is persisted before the outcome is returned; rejections
    /// touch nothing. Rejections are part of the normal result, not errors.
    ///
    /// # Errors
    ///
    /// Fails only when persisting the attendance collection fails; the
    /// in-memory snapshot is left unchanged in that case.
    pub async fn scan(&self, raw_uid: &str, now: NaiveDateTime) -> EngineResult<ScanOutcome> {
        let uid = raw_uid.trim().to_uppercase();
        let mut data = self.data.write().await;

        // The day's record for whoever is behind this card, if anyone.
        let holder = data
            .cards
            .iter()
            .find(|c| c.uid == uid)
            .map(|c| c.employee_id);
        let existing = holder.and_then(|employee_id| {
            data.attendance
                .iter()
                .find(|a| a.employee_id == employee_id && a.date == now.date())
        });

        let outcome = process_scan(
            &uid,
            now,
            &data.cards,
            &data.employees,
            existing,
            &data.settings,
        );

        match &outcome {
            ScanOutcome::ClockIn { record } | ScanOutcome::ClockOut { record } => {
                let mut next = data.attendance.clone();
                match next.iter_mut().find(|a| a.id == record.id) {
                    Some(slot) => *slot = record.clone(),
                    None => next.push(record.clone()),
                }
                self.repo.save_attendance(&next).await?;
                data.attendance = next;
                info!(
                    employee_id = %record.employee_id,
                    action = outcome.action(),
                    status = %record.status,
                    "Attendance recorded"
                );
            }
            ScanOutcome::Rejected { reason } => {
                warn!(card_uid = %uid, reason = reason.code(), "Scan rejected");
            }
        }
        Ok(outcome)
    }

    /// Records a manual attendance entry for an employee.
    ///
    /// Duplicates for the same employee and date are permitted; the entry
    /// is appended as-is.
    ///
    /// # Errors
    ///
    /// Fails when the employee does not exist or the write fails.
    pub async fn add_manual_entry(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        in_time: NaiveTime,
        out_time: NaiveTime,
    ) -> EngineResult<AttendanceRecord> {
        let mut data = self.data.write().await;
        if !data.employees.iter().any(|e| e.id == employee_id) {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }

        let record = manual_entry(employee_id, date, in_time, out_time, &data.settings);
        let mut next = data.attendance.clone();
        next.push(record.clone());
        self.repo.save_attendance(&next).await?;
        data.attendance = next;
        info!(employee_id = %employee_id, date = %date, "Manual attendance entry recorded");
        Ok(record)
    }

    // ---- Payroll and reports --------------------------------------------

    /// Computes payroll summaries for every employee in scope for a month.
    ///
    /// # Errors
    ///
    /// Fails when the month has no working days at all.
    pub async fn payroll_for_month(
        &self,
        month: PayMonth,
        branch: Option<Uuid>,
    ) -> EngineResult<Vec<PayrollSummary>> {
        let data = self.data.read().await;
        data.employees
            .iter()
            .filter(|e| e.matches_branch(branch))
            .map(|e| compute_payroll(e, month, &data.attendance, &data.holidays, &data.settings))
            .collect()
    }

    /// Builds one of the named reports.
    ///
    /// The daily attendance report needs `date`; every other kind needs
    /// `month`.
    ///
    /// # Errors
    ///
    /// Fails when the required date or month parameter is missing, or when
    /// the payroll report cannot derive rates for the month.
    pub async fn build_report(
        &self,
        kind: ReportKind,
        date: Option<NaiveDate>,
        month: Option<PayMonth>,
        branch: Option<Uuid>,
    ) -> EngineResult<ReportTable> {
        let data = self.data.read().await;
        let table = match kind {
            ReportKind::DailyAttendance => {
                let date = date.ok_or_else(|| missing_param("date"))?;
                daily_attendance_report(date, &data.employees, &data.attendance, branch)
            }
            ReportKind::MonthlyAttendance => monthly_attendance_report(
                month.ok_or_else(|| missing_param("month"))?,
                &data.employees,
                &data.attendance,
                &data.holidays,
                &data.settings,
                branch,
            ),
            ReportKind::LateReport => late_report(
                month.ok_or_else(|| missing_param("month"))?,
                &data.employees,
                &data.attendance,
                branch,
            ),
            ReportKind::OvertimeReport => overtime_report(
                month.ok_or_else(|| missing_param("month"))?,
                &data.employees,
                &data.attendance,
                branch,
            ),
            ReportKind::PayrollReport => payroll_report(
                month.ok_or_else(|| missing_param("month"))?,
                &data.employees,
                &data.attendance,
                &data.holidays,
                &data.settings,
                branch,
            )?,
        };
        info!(kind = %kind, rows = table.rows.len(), "Report generated");
        Ok(table)
    }

    // ---- Card registry --------------------------------------------------

    /// Returns the registered cards.
    pub async fn list_cards(&self) -> Vec<CardRecord> {
        self.data.read().await.cards.clone()
    }

    /// Registers a card for an employee.
    ///
    /// # Errors
    ///
    /// Fails when the uid is empty, already registered, or the employee
    /// does not exist.
    pub async fn register_card(
        &self,
        raw_uid: &str,
        employee_id: Uuid,
        registered_at: NaiveDateTime,
    ) -> EngineResult<CardRecord> {
        let uid = raw_uid.trim().to_uppercase();
        let mut data = self.data.write().await;
        if !data.employees.iter().any(|e| e.id == employee_id) {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }
        let card = build_card(&data, &uid, employee_id, registered_at)?;

        let mut next = data.cards.clone();
        next.push(card.clone());
        self.repo.save_cards(&next).await?;
        data.cards = next;
        info!(card_uid = %card.uid, employee_id = %employee_id, "Card registered");
        Ok(card)
    }

    /// Blocks or unblocks a card by uid.
    ///
    /// # Errors
    ///
    /// Fails when no card with this uid is registered.
    pub async fn set_card_blocked(&self, raw_uid: &str, blocked: bool) -> EngineResult<CardRecord> {
        let uid = raw_uid.trim().to_uppercase();
        let mut data = self.data.write().await;
        let mut next = data.cards.clone();
        let card = next
            .iter_mut()
            .find(|c| c.uid == uid)
            .ok_or_else(|| EngineError::CardNotFound { uid: uid.clone() })?;
        card.blocked = blocked;
        let card = card.clone();

        self.repo.save_cards(&next).await?;
        data.cards = next;
        info!(card_uid = %uid, blocked, "Card block state changed");
        Ok(card)
    }

    /// Removes a card from the registry by uid.
    ///
    /// # Errors
    ///
    /// Fails when no card with this uid is registered.
    pub async fn remove_card(&self, raw_uid: &str) -> EngineResult<()> {
        let uid = raw_uid.trim().to_uppercase();
        let mut data = self.data.write().await;
        if !data.cards.iter().any(|c| c.uid == uid) {
            return Err(EngineError::CardNotFound { uid });
        }

        let next: Vec<CardRecord> = data.cards.iter().filter(|c| c.uid != uid).cloned().collect();
        self.repo.save_cards(&next).await?;
        data.cards = next;
        info!(card_uid = %uid, "Card removed");
        Ok(())
    }

    // ---- Employees ------------------------------------------------------

    /// Returns the employee roster.
    pub async fn list_employees(&self) -> Vec<Employee> {
        self.data.read().await.employees.clone()
    }

    /// Adds an employee, seeding a linked login account and, when a card
    /// uid is given, registering the card in the same operation.
    ///
    /// The seeded account uses the lowercased employee code as username
    /// with the default password, so the employee can log in immediately.
    ///
    /// # Errors
    ///
    /// Fails when name or employee code is empty, when the card uid is
    /// already registered, or when a write fails.
    pub async fn create_employee(
        &self,
        employee: Employee,
        card_uid: Option<String>,
        registered_at: NaiveDateTime,
    ) -> EngineResult<Employee> {
        if employee.name.trim().is_empty() {
            return Err(validation("name", "employee name must not be empty"));
        }
        if employee.emp_code.trim().is_empty() {
            return Err(validation("emp_code", "employee code must not be empty"));
        }

        let mut data = self.data.write().await;
        let card = match card_uid {
            Some(raw) => Some(build_card(
                &data,
                &raw.trim().to_uppercase(),
                employee.id,
                registered_at,
            )?),
            None => None,
        };
        let account = UserAccount {
            id: Uuid::new_v4(),
            username: employee.emp_code.to_lowercase(),
            password: "emp123".to_string(),
            name: employee.name.clone(),
            role: Role::Employee,
            employee_id: Some(employee.id),
            branch_id: employee.branch_id,
        };

        let mut employees = data.employees.clone();
        employees.push(employee.clone());
        let mut users = data.users.clone();
        users.push(account);

        self.repo.save_employees(&employees).await?;
        self.repo.save_users(&users).await?;
        data.employees = employees;
        data.users = users;

        if let Some(card) = card {
            let mut cards = data.cards.clone();
            cards.push(card);
            self.repo.save_cards(&cards).await?;
            data.cards = cards;
        }

        info!(employee_id = %employee.id, emp_code = %employee.emp_code, "Employee created");
        Ok(employee)
    }

    /// Replaces an employee's details, keyed by id.
    ///
    /// # Errors
    ///
    /// Fails when the employee does not exist or the write fails.
    pub async fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let mut data = self.data.write().await;
        let mut next = data.employees.clone();
        let slot = next
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or(EngineError::EmployeeNotFound {
                employee_id: employee.id,
            })?;
        *slot = employee.clone();

        self.repo.save_employees(&next).await?;
        data.employees = next;
        info!(employee_id = %employee.id, "Employee updated");
        Ok(employee)
    }

    /// Deletes an employee along with their cards and linked login
    /// accounts.
    ///
    /// Attendance records are kept; they still feed historical reports.
    ///
    /// # Errors
    ///
    /// Fails when the employee does not exist or a write fails.
    pub async fn delete_employee(&self, employee_id: Uuid) -> EngineResult<()> {
        let mut data = self.data.write().await;
        if !data.employees.iter().any(|e| e.id == employee_id) {
            return Err(EngineError::EmployeeNotFound { employee_id });
        }

        let employees: Vec<Employee> = data
            .employees
            .iter()
            .filter(|e| e.id != employee_id)
            .cloned()
            .collect();
        let cards: Vec<CardRecord> = data
            .cards
            .iter()
            .filter(|c| c.employee_id != employee_id)
            .cloned()
            .collect();
        let users: Vec<UserAccount> = data
            .users
            .iter()
            .filter(|u| u.employee_id != Some(employee_id))
            .cloned()
            .collect();

        self.repo.save_employees(&employees).await?;
        self.repo.save_cards(&cards).await?;
        self.repo.save_users(&users).await?;
        data.employees = employees;
        data.cards = cards;
        data.users = users;
        info!(employee_id = %employee_id, "Employee deleted with cards and accounts");
        Ok(())
    }

    // ---- Holidays and branches ------------------------------------------

    /// Returns the holiday calendar.
    pub async fn list_holidays(&self) -> Vec<Holiday> {
        self.data.read().await.holidays.clone()
    }

    /// Adds a holiday to the calendar.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty or the write fails.
    pub async fn add_holiday(&self, date: NaiveDate, name: String) -> EngineResult<Holiday> {
        if name.trim().is_empty() {
            return Err(validation("name", "holiday name must not be empty"));
        }
        let holiday = Holiday {
            id: Uuid::new_v4(),
            date,
            name,
        };

        let mut data = self.data.write().await;
        let mut next = data.holidays.clone();
        next.push(holiday.clone());
        self.repo.save_holidays(&next).await?;
        data.holidays = next;
        info!(date = %holiday.date, name = %holiday.name, "Holiday added");
        Ok(holiday)
    }

    /// Removes a holiday by id. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the write fails.
    pub async fn remove_holiday(&self, holiday_id: Uuid) -> EngineResult<()> {
        let mut data = self.data.write().await;
        if !data.holidays.iter().any(|h| h.id == holiday_id) {
            return Ok(());
        }

        let next: Vec<Holiday> = data
            .holidays
            .iter()
            .filter(|h| h.id != holiday_id)
            .cloned()
            .collect();
        self.repo.save_holidays(&next).await?;
        data.holidays = next;
        Ok(())
    }

    /// Returns the branches.
    pub async fn list_branches(&self) -> Vec<Branch> {
        self.data.read().await.branches.clone()
    }

    /// Adds a branch.
    ///
    /// # Errors
    ///
    /// Fails when the name is empty or the write fails.
    pub async fn add_branch(&self, name: String, address: String) -> EngineResult<Branch> {
        if name.trim().is_empty() {
            return Err(validation("name", "branch name must not be empty"));
        }
        let branch = Branch {
            id: Uuid::new_v4(),
            name,
            address,
        };

        let mut data = self.data.write().await;
        let mut next = data.branches.clone();
        next.push(branch.clone());
        self.repo.save_branches(&next).await?;
        data.branches = next;
        info!(branch = %branch.name, "Branch added");
        Ok(branch)
    }

    // ---- Settings -------------------------------------------------------

    /// Returns the current attendance settings.
    pub async fn settings(&self) -> AttendanceSettings {
        self.data.read().await.settings.clone()
    }

    /// Validates and replaces the attendance settings.
    ///
    /// # Errors
    ///
    /// Fails when the settings are invalid or the write fails.
    pub async fn save_settings(&self, settings: AttendanceSettings) -> EngineResult<()> {
        settings.validate()?;
        let mut data = self.data.write().await;
        self.repo.save_settings(&settings).await?;
        data.settings = settings;
        info!("Attendance settings updated");
        Ok(())
    }

    // ---- Accounts -------------------------------------------------------

    /// Checks credentials against the stored accounts.
    ///
    /// Returns the matching account, or `None` for a username/password
    /// pair that matches nothing.
    pub async fn login(&self, username: &str, password: &str) -> Option<UserAccount> {
        let data = self.data.read().await;
        let user = data
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned();
        match &user {
            Some(account) => info!(username = %account.username, role = %account.role, "Login"),
            None => warn!(username = %username, "Login rejected"),
        }
        user
    }

    /// Returns all login accounts.
    pub async fn list_users(&self) -> Vec<UserAccount> {
        self.data.read().await.users.clone()
    }

    /// Adds a login account.
    ///
    /// # Errors
    ///
    /// Fails when name, username, or password is empty, or the write
    /// fails.
    pub async fn create_user(&self, user: UserAccount) -> EngineResult<UserAccount> {
        if user.name.trim().is_empty() {
            return Err(validation("name", "name must not be empty"));
        }
        if user.username.trim().is_empty() {
            return Err(validation("username", "username must not be empty"));
        }
        if user.password.is_empty() {
            return Err(validation("password", "password must not be empty"));
        }

        let mut data = self.data.write().await;
        let mut next = data.users.clone();
        next.push(user.clone());
        self.repo.save_users(&next).await?;
        data.users = next;
        info!(username = %user.username, role = %user.role, "User account created");
        Ok(user)
    }

    /// Deletes a login account.
    ///
    /// The last remaining super admin cannot be deleted; the system must
    /// stay administrable.
    ///
    /// # Errors
    ///
    /// Fails for an unknown id, for the last super admin, or when the
    /// write fails.
    pub async fn delete_user(&self, user_id: Uuid) -> EngineResult<()> {
        let mut data = self.data.write().await;
        let user = data
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| validation("user_id", "no such user account"))?;
        if user.is_super_admin() && data.users.iter().filter(|u| u.is_super_admin()).count() <= 1 {
            return Err(validation(
                "user_id",
                "cannot delete the last super admin",
            ));
        }

        let next: Vec<UserAccount> = data
            .users
            .iter()
            .filter(|u| u.id != user_id)
            .cloned()
            .collect();
        self.repo.save_users(&next).await?;
        data.users = next;
        info!(user_id = %user_id, "User account deleted");
        Ok(())
    }

    // ---- System ---------------------------------------------------------

    /// Deletes every stored collection and reseeds the defaults.
    ///
    /// # Errors
    ///
    /// Fails when a delete or reseed write fails; the snapshot is only
    /// replaced after the full reset succeeds.
    pub async fn reset_all(&self) -> EngineResult<()> {
        let mut data = self.data.write().await;
        self.repo.reset_all().await?;
        *data = Self::bootstrap(&self.repo).await?;
        warn!("All engine data reset");
        Ok(())
    }
}

/// Validates a new card's uid against the registry and assembles the
/// record. The holder need not be in the roster yet; employee creation
/// registers the card in the same operation.
fn build_card(
    data: &AppData,
    uid: &str,
    employee_id: Uuid,
    registered_at: NaiveDateTime,
) -> EngineResult<CardRecord> {
    if uid.is_empty() {
        return Err(validation("uid", "card uid must not be empty"));
    }
    if data.cards.iter().any(|c| c.uid == uid) {
        return Err(validation(
            "uid",
            format!("card '{uid}' is already registered"),
        ));
    }
    Ok(CardRecord {
        id: Uuid::new_v4(),
        uid: uid.to_string(),
        employee_id,
        blocked: false,
        registered_at,
    })
}

fn validation(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

fn missing_param(field: &str) -> EngineError {
    validation(field, format!("this report requires the '{field}' parameter"))
}
