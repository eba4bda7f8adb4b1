//! # Shell
//!
//! Line-oriented front end. Each input line is split into words, parsed by
//! `clap` into a [`ShellCommand`], dispatched to the command layer and
//! rendered as a table or, with `--json`, as JSON.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "add 4 --json"                                                         │
//! │       │ split_words                                                     │
//! │       ▼                                                                 │
//! │  ["add", "4", "--json"]                                                 │
//! │       │ ShellLine::try_parse_from                                       │
//! │       ▼                                                                 │
//! │  ShellCommand::Add { id: "4" }, json = true                            │
//! │       │ dispatch                                                        │
//! │       ▼                                                                 │
//! │  commands::shop::add_to_cart ──► Result<CartResponse, ApiError>         │
//! │       │ render                                                          │
//! │       ▼                                                                 │
//! │  table / JSON / one-line error notification                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors never end the loop. Only `quit` (or end of input) does.

use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use storefront_core::catalog_view::SortKey;
use storefront_core::reporting::SalesReport;
use storefront_core::validation::{parse_item_id, ItemDraft};
use storefront_core::{Coupon, Item, Order, Role};
use storefront_store::Storefront;

use crate::commands::admin::{self, DeletePrompt};
use crate::commands::auth::{self, SessionResponse};
use crate::commands::shop::{self, CartResponse, CouponResponse};
use crate::error::ApiError;
use crate::render;
use crate::routing::View;
use crate::state::{ConfigState, Session};

// =============================================================================
// Line Grammar
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
struct ShellLine {
    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Debug, Subcommand)]
enum ShellCommand {
    /// Sign in
    Login { username: String, password: String },
    /// Sign out (items in your cart go back on the shelf)
    Logout,
    /// Show who is signed in
    Whoami,
    /// Go to a view: login, admin, shop, thank-you
    View { view: View },
    /// List items
    Items,
    /// Filter the admin table by name, price or quantity
    Search { text: Vec<String> },
    /// Sort the admin table (same column again flips direction)
    Sort { key: SortColumn },
    /// Add an item to the catalog
    AddItem(AddItemArgs),
    /// Delete an item (asks for confirmation)
    Delete { id: String },
    /// Confirm the pending delete
    Confirm,
    /// Cancel the pending delete
    Cancel,
    /// Add stock to an item
    Restock {
        id: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Show all coupons
    Coupons,
    /// Show all orders
    Orders,
    /// Sales in the trailing window and top sellers
    Report {
        /// Window size in hours
        #[arg(long)]
        hours: Option<i64>,
        /// Number of top sellers
        #[arg(long)]
        top: Option<usize>,
    },
    /// Put one unit of an item in your cart
    Add { id: String },
    /// Remove a cart line by its position
    Remove { position: usize },
    /// Show your cart
    Cart,
    /// Apply a coupon code
    Coupon { code: String },
    /// Place the order
    Checkout,
    /// Close the receipt and return to the login screen
    Continue,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Args)]
struct AddItemArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    price: String,
    #[arg(long, allow_hyphen_values = true)]
    quantity: String,
    /// Apply the 10% item discount
    #[arg(long)]
    discount: bool,
}

impl From<AddItemArgs> for ItemDraft {
    fn from(args: AddItemArgs) -> Self {
        ItemDraft {
            name: args.name,
            category: args.category,
            price: args.price,
            quantity: args.quantity,
            discount_applicable: args.discount,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortColumn {
    Name,
    Price,
    Quantity,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Name => SortKey::Name,
            SortColumn::Price => SortKey::Price,
            SortColumn::Quantity => SortKey::Quantity,
        }
    }
}

/// Splits a line into words. Single or double quotes group words.
fn split_words(line: &str) -> Result<Vec<String>, ApiError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ApiError::validation("Unterminated quote"));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

// =============================================================================
// Replies
// =============================================================================

/// A command result before rendering.
#[derive(Debug)]
enum Reply {
    Message(String),
    Session(SessionResponse),
    Items(Vec<Item>),
    Item { headline: String, item: Item },
    DeletePrompt(DeletePrompt),
    Cart(CartResponse),
    Coupon(CouponResponse),
    Coupons(Vec<Coupon>),
    Orders(Vec<Order>),
    Report(SalesReport),
    Order(Order),
}

#[derive(Serialize)]
struct MessageJson<'a> {
    message: &'a str,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}

impl Reply {
    fn render(&self, config: &ConfigState, json: bool) -> String {
        if json {
            return match self {
                Reply::Message(message) => to_json(&MessageJson { message }),
                Reply::Session(session) => to_json(session),
                Reply::Items(items) => to_json(items),
                Reply::Item { item, .. } => to_json(item),
                Reply::DeletePrompt(prompt) => to_json(prompt),
                Reply::Cart(cart) => to_json(cart),
                Reply::Coupon(coupon) => to_json(coupon),
                Reply::Coupons(coupons) => to_json(coupons),
                Reply::Orders(orders) => to_json(orders),
                Reply::Report(report) => to_json(report),
                Reply::Order(order) => to_json(order),
            };
        }

        match self {
            Reply::Message(message) => message.clone(),
            Reply::Session(session) => match &session.user {
                Some(user) => format!(
                    "Signed in as {} ({}). View: {}",
                    user.username, user.role, session.view
                ),
                None => format!("Not signed in. View: {}", session.view),
            },
            Reply::Items(items) => render::items(config, items),
            Reply::Item { headline, item } => {
                format!("{headline}\n{}", render::items(config, std::slice::from_ref(item)))
            }
            Reply::DeletePrompt(prompt) => prompt.prompt.clone(),
            Reply::Cart(cart) => render::cart(config, cart),
            Reply::Coupon(coupon) => format!(
                "Coupon {} applied: -{} ({} uses left)\n{}",
                coupon.code,
                config.format_currency(coupon.discount_cents),
                coupon.remaining_uses,
                render::cart(config, &coupon.cart)
            ),
            Reply::Coupons(coupons) => render::coupons(coupons),
            Reply::Orders(orders) => render::orders(config, orders),
            Reply::Report(report) => render::report(config, report),
            Reply::Order(order) => render::receipt(config, order),
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit(String),
}

/// One interactive session over a reader/writer pair.
#[derive(Debug)]
pub struct Shell {
    config: ConfigState,
    session: Session,
    json: bool,
}

impl Shell {
    pub fn new(store: Storefront, config: ConfigState) -> Self {
        Shell {
            config,
            session: Session::new(store),
            json: false,
        }
    }

    /// Render every result as JSON, as if each line had `--json`.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prompt showing the current view and user.
    pub fn prompt(&self) -> String {
        match self.session.user() {
            Some(user) => format!("[{} {}] > ", self.session.view(), user.username),
            None => format!("[{}] > ", self.session.view()),
        }
    }

    /// Runs one line.
    pub fn execute(&mut self, line: &str) -> Step {
        let words = match split_words(line) {
            Ok(words) if words.is_empty() => return Step::Continue(String::new()),
            Ok(words) => words,
            Err(err) => return Step::Continue(self.render_error(&err, self.json)),
        };

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        Step::Continue(err.render().to_string())
                    }
                    _ => {
                        let message = err.render().to_string();
                        let first = message.lines().next().unwrap_or_default();
                        let first = first.trim_start_matches("error: ").to_string();
                        Step::Continue(self.render_error(&ApiError::validation(first), self.json))
                    }
                };
            }
        };

        let json = self.json || parsed.json;
        if matches!(parsed.command, ShellCommand::Quit) {
            let returned = self.session.sign_out();
            return Step::Quit(if returned > 0 {
                format!("Goodbye. {returned} reserved item(s) returned to stock.")
            } else {
                "Goodbye.".to_string()
            });
        }

        debug!(command = ?parsed.command, "Dispatching");
        match self.dispatch(parsed.command) {
            Ok(reply) => Step::Continue(reply.render(&self.config, json)),
            Err(err) => Step::Continue(self.render_error(&err, json)),
        }
    }

    fn render_error(&self, err: &ApiError, json: bool) -> String {
        if json {
            to_json(err)
        } else {
            format!("! {}", err.message)
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<Reply, ApiError> {
        let session = &mut self.session;

        let reply = match command {
            ShellCommand::Login { username, password } => {
                Reply::Session(auth::login(session, &username, &password)?)
            }
            ShellCommand::Logout => {
                let returned = auth::logout(session);
                Reply::Message(if returned > 0 {
                    format!("Signed out. {returned} reserved item(s) returned to stock.")
                } else {
                    "Signed out.".to_string()
                })
            }
            ShellCommand::Whoami => Reply::Session(auth::whoami(session)),
            ShellCommand::View { view } => Reply::Session(auth::navigate(session, view)),

            ShellCommand::Items => match session.user().map(|user| user.role) {
                Some(Role::Admin) => Reply::Items(admin::list_items(session)?),
                _ => Reply::Items(shop::browse(session)?),
            },
            ShellCommand::Search { text } => Reply::Items(admin::search(session, &text.join(" "))?),
            ShellCommand::Sort { key } => Reply::Items(admin::sort(session, key.into())?),
            ShellCommand::AddItem(args) => Reply::Item {
                headline: "Item added.".to_string(),
                item: admin::add_item(session, args.into())?,
            },
            ShellCommand::Delete { id } => {
                Reply::DeletePrompt(admin::request_delete(session, parse_item_id(&id)?.0)?)
            }
            ShellCommand::Confirm => {
                let item = admin::confirm_delete(session)?;
                Reply::Message(format!("Deleted {} (item {}).", item.name, item.id))
            }
            ShellCommand::Cancel => Reply::Message(if admin::cancel_delete(session)? {
                "Delete cancelled.".to_string()
            } else {
                "Nothing to cancel.".to_string()
            }),
            ShellCommand::Restock { id, amount } => Reply::Item {
                headline: "Restocked.".to_string(),
                item: admin::restock(session, parse_item_id(&id)?.0, &amount)?,
            },
            ShellCommand::Coupons => Reply::Coupons(admin::list_coupons(session)?),
            ShellCommand::Orders => Reply::Orders(admin::list_orders(session)?),
            ShellCommand::Report { hours, top } => {
                Reply::Report(admin::sales_report(session, &self.config, hours, top)?)
            }

            ShellCommand::Add { id } => Reply::Cart(shop::add_to_cart(session, parse_item_id(&id)?.0)?),
            ShellCommand::Remove { position } => Reply::Cart(shop::remove_from_cart(session, position)?),
            ShellCommand::Cart => Reply::Cart(shop::get_cart(session)?),
            ShellCommand::Coupon { code } => Reply::Coupon(shop::apply_coupon(session, &code)?),
            ShellCommand::Checkout => Reply::Order(shop::checkout(session)?),
            ShellCommand::Continue => {
                let view = shop::close_receipt(session)?;
                Reply::Message(format!("View: {view}"))
            }

            ShellCommand::Quit => Reply::Message(String::new()),
        };
        Ok(reply)
    }

    /// Reads lines until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        writeln!(
            output,
            "Welcome to {}. Type 'help' for commands.",
            self.config.store_name
        )?;

        let mut lines = input.lines();
        loop {
            write!(output, "{}", self.prompt())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                let returned = self.session.sign_out();
                info!(returned, "Input closed");
                writeln!(output)?;
                return Ok(());
            };

            match self.execute(&line?) {
                Step::Continue(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
                Step::Quit(text) => {
                    writeln!(output, "{text}")?;
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::new(Storefront::seeded().unwrap(), ConfigState::default())
    }

    fn out(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line) {
            Step::Continue(text) | Step::Quit(text) => text,
        }
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"add-item --name "Head Shoulders" --price 9"#).unwrap(),
            vec!["add-item", "--name", "Head Shoulders", "--price", "9"]
        );
        assert_eq!(split_words("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words("coupon ''").unwrap(), vec!["coupon", ""]);
        assert!(split_words("search \"dove").is_err());
    }

    #[test]
    fn test_customer_flow() {
        let mut shell = shell();
        assert!(out(&mut shell, "login John john").contains("View: shop"));
        assert_eq!(shell.prompt(), "[shop John] > ");

        assert!(out(&mut shell, "add 2").contains("$27.00"));
        assert!(out(&mut shell, "coupon PROMO10").contains("$24.30"));

        let receipt = out(&mut shell, "checkout");
        assert!(receipt.contains("Order placed successfully!"));
        assert!(receipt.contains("Thank You for Your Order!"));
        assert_eq!(shell.session().view(), View::ThankYou);
        assert!(shell.session().user().is_none());
        assert_eq!(shell.prompt(), "[thank-you] > ");

        assert_eq!(out(&mut shell, "checkout"), "! Please sign in first");
        assert_eq!(out(&mut shell, "continue"), "View: login");
    }

    #[test]
    fn test_errors_keep_session() {
        let mut shell = shell();
        assert_eq!(out(&mut shell, "add 1"), "! Please sign in first");
        assert_eq!(out(&mut shell, "login John nope"), "! Invalid credentials");
        assert!(out(&mut shell, "frobnicate").starts_with("! "));

        out(&mut shell, "login John john");
        assert_eq!(
            out(&mut shell, "add abc"),
            "! item id is not a valid number: 'abc'"
        );
        assert_eq!(out(&mut shell, "coupon NOPE"), "! Invalid or expired coupon: NOPE");
        assert_eq!(out(&mut shell, "remove 1"), "! Cart line not found: 1");
    }

    #[test]
    fn test_json_output() {
        let mut shell = shell();
        out(&mut shell, "login admin admin");

        let json: serde_json::Value =
            serde_json::from_str(&out(&mut shell, "items --json")).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);

        let json: serde_json::Value =
            serde_json::from_str(&out(&mut shell, "add 1 --json")).unwrap();
        assert_eq!(json["code"], "ACCESS_DENIED");
    }

    #[test]
    fn test_admin_delete_flow() {
        let mut shell = shell();
        out(&mut shell, "login admin admin");

        assert!(out(&mut shell, "delete 4").contains("Are you sure"));
        assert_eq!(out(&mut shell, "confirm"), "Deleted Lux (item 4).");
        assert_eq!(out(&mut shell, "cancel"), "Nothing to cancel.");
        assert!(!out(&mut shell, "items").contains("Lux"));
    }

    #[test]
    fn test_run_loop() {
        let mut shell = shell();
        let input = "login Mark mark\nadd 4\nquit\nitems\n";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Welcome to Storefront."));
        assert!(text.contains("Goodbye. 1 reserved item(s) returned to stock."));
        assert!(!text.contains("No items."));
    }
}
