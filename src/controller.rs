//! Gesture handling for the purchase form.
//!
//! [`plan`] decides, without touching storage, what a gesture should do.
//! [`Controller`] carries the state a window would otherwise keep in its
//! widgets (displayed rows, selection, form text, status line) and runs plans
//! against a [`PurchaseRepository`].

use tracing::{debug, error, info};

use crate::error::{StorageError, ValidationError};
use crate::record::PurchaseRecord;
use crate::sqlite::PurchaseRepository;

pub const MSG_FILL_ALL_TO_ADD: &str = "Please fill in all fields before adding.";
pub const MSG_FILL_ALL_TO_UPDATE: &str = "All fields required to update.";
pub const MSG_NOT_NUMERIC: &str = "Quantity and Price must be numbers.";
pub const MSG_SELECT_TO_UPDATE: &str = "Select a row to update.";
pub const MSG_SELECT_TO_DELETE: &str = "Select a row to delete.";
pub const MSG_ADDED: &str = "Anime purchase added successfully!";
pub const MSG_UPDATED: &str = "Anime purchase updated successfully!";
pub const MSG_DELETED: &str = "Anime purchase deleted.";

/// Raw text of the three form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub title: String,
    pub quantity: String,
    pub price: String,
}

impl FormState {
    pub fn new(
        title: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }

    pub fn from_record(record: &PurchaseRecord) -> Self {
        Self::new(
            record.title.clone(),
            record.quantity_text(),
            record.price_text(),
        )
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trim, require all three fields, then parse quantity and price.
    /// `inf`, `infinity` and `NaN` are not prices.
    pub fn parse(&self) -> Result<(String, i32, f64), ValidationError> {
        let title = self.title.trim();
        let quantity = self.quantity.trim();
        let price = self.price.trim();
        if title.is_empty() || quantity.is_empty() || price.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let quantity = quantity
            .parse::<i32>()
            .map_err(|_| ValidationError::NotNumeric)?;
        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or(ValidationError::NotNumeric)?;
        Ok((title.to_string(), quantity, price))
    }
}

/// User actions: the four buttons plus clicking a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Add,
    Update,
    Delete,
    Refresh,
    Select(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageCommand {
    Insert {
        title: String,
        quantity: i32,
        price: f64,
    },
    Update {
        id: i64,
        title: String,
        quantity: i32,
        price: f64,
    },
    Delete {
        id: i64,
    },
    Reload,
}

/// What a gesture resolves to before storage is involved
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Run(StorageCommand),
    /// Copy the row at this index into the form
    Select(usize),
}

/// A gesture refused up front; carries the status line to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection(pub &'static str);

fn validation_message(err: ValidationError, missing: &'static str) -> &'static str {
    match err {
        ValidationError::MissingFields => missing,
        ValidationError::NotNumeric => MSG_NOT_NUMERIC,
    }
}

/// Resolve a gesture against the current form and selection.
pub fn plan(
    gesture: Gesture,
    form: &FormState,
    selected: Option<&PurchaseRecord>,
) -> Result<Plan, Rejection> {
    match gesture {
        Gesture::Add => {
            let (title, quantity, price) = form
                .parse()
                .map_err(|e| Rejection(validation_message(e, MSG_FILL_ALL_TO_ADD)))?;
            Ok(Plan::Run(StorageCommand::Insert {
                title,
                quantity,
                price,
            }))
        }
        Gesture::Update => {
            let id = selected
                .and_then(|r| r.id)
                .ok_or(Rejection(MSG_SELECT_TO_UPDATE))?;
            let (title, quantity, price) = form
                .parse()
                .map_err(|e| Rejection(validation_message(e, MSG_FILL_ALL_TO_UPDATE)))?;
            Ok(Plan::Run(StorageCommand::Update {
                id,
                title,
                quantity,
                price,
            }))
        }
        Gesture::Delete => {
            let id = selected
                .and_then(|r| r.id)
                .ok_or(Rejection(MSG_SELECT_TO_DELETE))?;
            Ok(Plan::Run(StorageCommand::Delete { id }))
        }
        Gesture::Refresh => Ok(Plan::Run(StorageCommand::Reload)),
        Gesture::Select(index) => Ok(Plan::Select(index)),
    }
}

/// Explicit UI state plus the repository it drives
pub struct Controller<R> {
    repo: R,
    records: Vec<PurchaseRecord>,
    selected: Option<usize>,
    form: FormState,
    status: String,
}

impl<R: PurchaseRepository> Controller<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            records: Vec::new(),
            selected: None,
            form: FormState::default(),
            status: String::new(),
        }
    }

    /// Create the table if needed, then load the list.
    ///
    /// A schema failure is logged and startup carries on with whatever
    /// table state exists.
    pub fn start(&mut self) {
        if let Err(e) = self.repo.ensure_schema() {
            error!("could not ensure schema: {}", e);
        }
        self.reload();
    }

    pub fn records(&self) -> &[PurchaseRecord] {
        &self.records
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&PurchaseRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Apply one gesture. Returns `false` only when a row selection points
    /// past the end of the list, in which case nothing changes.
    pub fn handle(&mut self, gesture: Gesture) -> bool {
        debug!("handling {:?}", gesture);
        match plan(gesture, &self.form, self.selected()) {
            Err(Rejection(message)) => {
                self.status = message.to_string();
                true
            }
            Ok(Plan::Select(index)) => self.select(index),
            Ok(Plan::Run(command)) => {
                self.run(command);
                true
            }
        }
    }

    fn select(&mut self, index: usize) -> bool {
        match self.records.get(index) {
            Some(record) => {
                self.form = FormState::from_record(record);
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    fn run(&mut self, command: StorageCommand) {
        match self.execute(&command) {
            Ok(None) => self.reload(),
            Ok(Some(message)) => {
                info!("{}", message);
                self.status = message.to_string();
                self.form.clear();
                self.reload();
            }
            Err(e) => {
                error!("{:?} failed: {}", command, e);
                self.status = format!("DB Error: {}", e);
            }
        }
    }

    /// Issue the statement behind a command. Mutations yield their success
    /// message; a reload yields `None`.
    fn execute(&self, command: &StorageCommand) -> Result<Option<&'static str>, StorageError> {
        match command {
            StorageCommand::Insert {
                title,
                quantity,
                price,
            } => {
                self.repo.insert(title, *quantity, *price)?;
                Ok(Some(MSG_ADDED))
            }
            StorageCommand::Update {
                id,
                title,
                quantity,
                price,
            } => {
                self.repo.update(*id, title, *quantity, *price)?;
                Ok(Some(MSG_UPDATED))
            }
            StorageCommand::Delete { id } => {
                self.repo.delete(*id)?;
                Ok(Some(MSG_DELETED))
            }
            StorageCommand::Reload => Ok(None),
        }
    }

    /// Replace the displayed list in full. On failure the list stays empty.
    fn reload(&mut self) {
        self.records.clear();
        self.selected = None;
        match self.repo.list_all() {
            Ok(records) => self.records = records,
            Err(e) => {
                error!("load failed: {}", e);
                self.status = format!("DB Error (Load): {}", e);
            }
        }
    }
}
