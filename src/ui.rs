//! Terminal presentation: renders the purchase table and form, and turns
//! typed lines into form edits and gestures.

use crate::controller::{Controller, FormState, Gesture};
use crate::record::PurchaseRecord;
use crate::sqlite::PurchaseRepository;

pub const WINDOW_TITLE: &str = "Anime Movie Inventory System";

pub const HELP: &str = "\
Commands:
  title <text>      set the Title field
  quantity <text>   set the Quantity field
  price <text>      set the Price field
  select <row>      select a row (numbered from 1) and copy it into the form
  add | update | delete | refresh
  clear             empty the form
  help              show this text
  quit              leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Quantity,
    Price,
}

/// One parsed line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    SetField(Field, String),
    Gesture(Gesture),
    ClearForm,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim_start();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line.trim_end(), ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "title" => Ok(Input::SetField(Field::Title, rest.to_string())),
        "quantity" | "qty" => Ok(Input::SetField(Field::Quantity, rest.to_string())),
        "price" => Ok(Input::SetField(Field::Price, rest.to_string())),
        "add" => Ok(Input::Gesture(Gesture::Add)),
        "update" => Ok(Input::Gesture(Gesture::Update)),
        "delete" => Ok(Input::Gesture(Gesture::Delete)),
        "refresh" => Ok(Input::Gesture(Gesture::Refresh)),
        "select" => {
            let row: usize = rest
                .parse()
                .map_err(|_| format!("select needs a row number, got '{}'", rest))?;
            if row == 0 {
                return Err("rows are numbered from 1".to_string());
            }
            Ok(Input::Gesture(Gesture::Select(row - 1)))
        }
        "clear" => Ok(Input::ClearForm),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        "" => Err("type a command, or 'help'".to_string()),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

pub fn set_field(form: &mut FormState, field: Field, value: String) {
    match field {
        Field::Title => form.title = value,
        Field::Quantity => form.quantity = value,
        Field::Price => form.price = value,
    }
}

fn column_width(header: &str, cells: impl Iterator<Item = usize>) -> usize {
    cells.fold(header.chars().count(), usize::max)
}

/// Table with columns ID, Title, Quantity, Price. Rows carry a 1-based
/// number for `select`; `>` marks the selected one.
pub fn render_table(records: &[PurchaseRecord], selected: Option<usize>) -> String {
    let ids: Vec<String> = records
        .iter()
        .map(|r| r.id.map(|id| id.to_string()).unwrap_or_default())
        .collect();
    let quantities: Vec<String> = records.iter().map(PurchaseRecord::quantity_text).collect();
    let prices: Vec<String> = records.iter().map(PurchaseRecord::price_text).collect();

    let row_w = column_width("#", (1..=records.len()).map(|n| n.to_string().len()));
    let id_w = column_width("ID", ids.iter().map(String::len));
    let title_w = column_width("Title", records.iter().map(|r| r.title.chars().count()));
    let qty_w = column_width("Quantity", quantities.iter().map(String::len));
    let price_w = column_width("Price", prices.iter().map(String::len));

    let mut out = format!(
        "  {:>row_w$} | {:>id_w$} | {:<title_w$} | {:>qty_w$} | {:>price_w$}\n",
        "#", "ID", "Title", "Quantity", "Price"
    );
    out.push_str(&format!(
        "  {}-+-{}-+-{}-+-{}-+-{}\n",
        "-".repeat(row_w),
        "-".repeat(id_w),
        "-".repeat(title_w),
        "-".repeat(qty_w),
        "-".repeat(price_w)
    ));
    if records.is_empty() {
        out.push_str("  (no purchases)\n");
    }
    for (i, record) in records.iter().enumerate() {
        let marker = if selected == Some(i) { '>' } else { ' ' };
        out.push_str(&format!(
            "{} {:>row_w$} | {:>id_w$} | {:<title_w$} | {:>qty_w$} | {:>price_w$}\n",
            marker,
            i + 1,
            ids[i],
            record.title,
            quantities[i],
            prices[i]
        ));
    }
    out
}

pub fn render_form(form: &FormState, status: &str) -> String {
    let mut out = format!(
        "Title:    {}\nQuantity: {}\nPrice:    {}\n",
        form.title, form.quantity, form.price
    );
    out.push_str("[ Add ] [ Update ] [ Delete ] [ Refresh ]\n");
    if !status.is_empty() {
        out.push_str(status);
        out.push('\n');
    }
    out
}

/// Whole screen: header, table, form, status line
pub fn render<R: PurchaseRepository>(controller: &Controller<R>) -> String {
    let mut out = format!("{}\n", WINDOW_TITLE);
    out.push_str(&render_table(
        controller.records(),
        controller.selected_index(),
    ));
    out.push('\n');
    out.push_str(&render_form(controller.form(), controller.status()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_commands() {
        assert_eq!(
            parse_input("title  Cowboy Bebop "),
            Ok(Input::SetField(Field::Title, "Cowboy Bebop".to_string()))
        );
        assert_eq!(
            parse_input("quantity 4"),
            Ok(Input::SetField(Field::Quantity, "4".to_string()))
        );
        assert_eq!(
            parse_input("price"),
            Ok(Input::SetField(Field::Price, String::new()))
        );
    }

    #[test]
    fn test_parse_buttons() {
        assert_eq!(parse_input("add"), Ok(Input::Gesture(Gesture::Add)));
        assert_eq!(parse_input("UPDATE"), Ok(Input::Gesture(Gesture::Update)));
        assert_eq!(parse_input(" delete "), Ok(Input::Gesture(Gesture::Delete)));
        assert_eq!(parse_input("refresh"), Ok(Input::Gesture(Gesture::Refresh)));
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
    }

    #[test]
    fn test_parse_select_is_one_based() {
        assert_eq!(
            parse_input("select 2"),
            Ok(Input::Gesture(Gesture::Select(1)))
        );
        assert!(parse_input("select 0").is_err());
        assert!(parse_input("select two").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_input("").is_err());
        assert!(parse_input("launch rockets").is_err());
    }

    #[test]
    fn test_render_table_marks_selection() {
        let records = vec![
            PurchaseRecord::loaded(1, "Naruto", 3, 9.99),
            PurchaseRecord::loaded(2, "Akira", 1, 20.0),
        ];
        let table = render_table(&records, Some(1));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("ID"));
        assert!(lines[0].contains("Quantity"));
        assert!(lines[2].starts_with("  1 |  1 | Naruto"));
        assert!(lines[2].ends_with("9.99"));
        assert!(lines[3].starts_with("> 2 |  2 | Akira"));
        assert!(lines[3].ends_with("20.0"));
    }

    #[test]
    fn test_render_empty_table() {
        let table = render_table(&[], None);
        assert!(table.contains("(no purchases)"));
    }

    #[test]
    fn test_render_form_with_status() {
        let form = FormState::new("Naruto", "3", "9.99");
        let text = render_form(&form, "Anime purchase added successfully!");
        assert!(text.contains("Title:    Naruto"));
        assert!(text.ends_with("Anime purchase added successfully!\n"));
    }
}
