//! Expense CLI commands
//!
//! Implements CLI commands for recording expenses, browsing them, and
//! marking participant shares as settled.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list, format_history};
use crate::error::{FairshareError, FairshareResult};
use crate::ledger::SplitStrategy;
use crate::models::{Category, ExpenseId, Person, PersonId};
use crate::services::{
    find_in, DateRange, ExpenseDraft, ExpenseFilter, ExpenseService, PersonService,
};
use crate::storage::{ExpenseSort, Store};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    Add {
        /// What the money was spent on
        title: String,
        /// Total amount paid
        amount: String,
        /// Person who paid (name or ID)
        #[arg(long)]
        paid_by: String,
        /// People sharing the expense (names or IDs)
        #[arg(long = "with", num_args = 1.., required = true)]
        with: Vec<String>,
        /// Custom share as PERSON=AMOUNT; switches to a custom split
        #[arg(long = "share", value_name = "PERSON=AMOUNT")]
        shares: Vec<String>,
        /// Category (food, transport, accommodation, ...)
        #[arg(short, long)]
        category: Option<String>,
        /// Date the expense happened (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
        /// Currency code
        #[arg(long)]
        currency: Option<String>,
    },
    /// List expenses
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort key: created_date, expense_date or total_amount; prefix with - for descending
        #[arg(short, long, default_value = "-created_date", allow_hyphen_values = true)]
        sort: String,
        /// Maximum number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show an expense with its participant shares
    Show {
        /// Expense ID
        expense: String,
    },
    /// Show expenses grouped by day
    History {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Toggle whether a participant has settled their share
    Settle {
        /// Expense ID
        expense: String,
        /// Participant name or ID
        person: String,
    },
}

/// Filters shared by `list` and `history`
#[derive(Args)]
pub struct FilterArgs {
    /// Only this category
    #[arg(short, long)]
    category: Option<String>,
    /// Only expenses paid by this person
    #[arg(short, long)]
    paid_by: Option<String>,
    /// Date range: all, week, month or year
    #[arg(short, long, default_value = "all")]
    range: String,
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &dyn Store,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FairshareResult<()> {
    let service = ExpenseService::new(store);
    let symbol = settings.currency_symbol.as_str();
    let today = Local::now().date_naive();

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            paid_by,
            with,
            shares,
            category,
            date,
            description,
            currency,
        } => {
            let people = PersonService::new(store).list()?;

            let paid_by = resolve_in(&people, &paid_by)?;
            let participants = with
                .iter()
                .map(|p| resolve_in(&people, p))
                .collect::<FairshareResult<Vec<_>>>()?;
            let strategy = parse_shares(&people, &participants, &shares)?;

            let draft = ExpenseDraft {
                title,
                description,
                total: amount,
                currency: currency.or_else(|| Some(settings.default_currency.clone())),
                paid_by: Some(paid_by),
                participants,
                strategy,
                category: parse_category(category.as_deref())?.unwrap_or_default(),
                expense_date: date.as_deref().map(parse_date).transpose()?,
            };

            let expense = service.create(&draft)?;
            println!(
                "Added expense: {} {} ({})",
                expense.title,
                settings.format_money(expense.total_amount),
                expense.id
            );
            for share in &expense.participants {
                println!(
                    "  {:<20} owes {}",
                    crate::services::name_of(&people, share.person_id),
                    settings.format_money(share.amount_owed)
                );
            }
        }

        ExpenseCommands::List {
            filter,
            sort,
            limit,
        } => {
            let people = PersonService::new(store).list()?;
            let mut expense_filter = filter.resolve(&people)?;
            expense_filter.sort = sort.parse::<ExpenseSort>().unwrap_or_default();
            expense_filter.limit = limit;

            let expenses = service.list(&expense_filter, today)?;
            println!("{}", format_expense_list(&expenses, &people, symbol, &settings.date_format));
        }

        ExpenseCommands::Show { expense } => {
            let id = parse_expense_id(&expense)?;
            let people = PersonService::new(store).list()?;
            let e = service.require(id)?;
            print!("{}", format_expense_details(&e, &people, symbol, &settings.date_format));
        }

        ExpenseCommands::History { filter } => {
            let people = PersonService::new(store).list()?;
            let expense_filter = filter.resolve(&people)?;
            let groups = service.history(&expense_filter, today)?;
            print!(
                "{}",
                format_history(&groups, &people, symbol, expense_filter.range.label())
            );
        }

        ExpenseCommands::Settle { expense, person } => {
            let id = parse_expense_id(&expense)?;
            let people = PersonService::new(store).list()?;
            let person = find_in(&people, &person)
                .ok_or_else(|| FairshareError::person_not_found(person.as_str()))?;

            let updated = service.toggle_settlement(id, person.id)?;
            let settled = updated
                .share_for(person.id)
                .map(|s| s.is_settled)
                .unwrap_or(false);
            println!(
                "{} is now {} on '{}'",
                person.name,
                if settled { "settled" } else { "pending" },
                updated.title
            );
        }
    }

    Ok(())
}

impl FilterArgs {
    fn resolve(&self, people: &[Person]) -> FairshareResult<ExpenseFilter> {
        Ok(ExpenseFilter {
            category: parse_category(self.category.as_deref())?,
            paid_by: self
                .paid_by
                .as_deref()
                .map(|p| resolve_in(people, p))
                .transpose()?,
            range: self.range.parse::<DateRange>()?,
            ..ExpenseFilter::default()
        })
    }
}

fn resolve_in(people: &[Person], identifier: &str) -> FairshareResult<PersonId> {
    find_in(people, identifier)
        .map(|p| p.id)
        .ok_or_else(|| FairshareError::person_not_found(identifier))
}

/// Turn `--share PERSON=AMOUNT` flags into a split strategy
///
/// No flags means an equal split. Amounts are coerced leniently, so a typo
/// counts as zero and is caught by the split-total check.
fn parse_shares(
    people: &[Person],
    participants: &[PersonId],
    shares: &[String],
) -> FairshareResult<SplitStrategy> {
    if shares.is_empty() {
        return Ok(SplitStrategy::Equal);
    }

    let mut entries = Vec::with_capacity(shares.len());
    for raw in shares {
        let (who, amount) = raw.rsplit_once('=').ok_or_else(|| {
            FairshareError::Validation(format!(
                "Invalid share '{}': expected PERSON=AMOUNT",
                raw
            ))
        })?;

        let id = resolve_in(people, who)?;
        if !participants.contains(&id) {
            return Err(FairshareError::Validation(format!(
                "'{}' has a share but is not listed in --with",
                who.trim()
            )));
        }
        entries.push((id, amount));
    }

    Ok(SplitStrategy::custom_from_raw(entries))
}

fn parse_category(raw: Option<&str>) -> FairshareResult<Option<Category>> {
    raw.map(|c| c.parse::<Category>().map_err(FairshareError::Validation))
        .transpose()
}

fn parse_date(raw: &str) -> FairshareResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        FairshareError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", raw))
    })
}

fn parse_expense_id(raw: &str) -> FairshareResult<ExpenseId> {
    raw.parse::<ExpenseId>()
        .map_err(|_| FairshareError::expense_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewPerson};

    fn people() -> Vec<Person> {
        vec![
            NewPerson::named("Asha").into_person(PersonId::new(1)),
            NewPerson::named("Ravi").into_person(PersonId::new(2)),
            NewPerson::named("Meera").into_person(PersonId::new(3)),
        ]
    }

    #[test]
    fn test_no_shares_is_equal_split() {
        let strategy = parse_shares(&people(), &[PersonId::new(1)], &[]).unwrap();
        assert_eq!(strategy, SplitStrategy::Equal);
    }

    #[test]
    fn test_parse_shares_by_name_and_id() {
        let participants = [PersonId::new(1), PersonId::new(2)];
        let strategy = parse_shares(
            &people(),
            &participants,
            &["asha=400".to_string(), "p-2=200.5".to_string()],
        )
        .unwrap();

        let SplitStrategy::Custom(amounts) = strategy else {
            panic!("expected a custom split");
        };
        assert_eq!(amounts[&PersonId::new(1)], Money::new(400.0));
        assert_eq!(amounts[&PersonId::new(2)], Money::new(200.5));
    }

    #[test]
    fn test_share_for_non_participant_is_rejected() {
        let err = parse_shares(&people(), &[PersonId::new(1)], &["Meera=10".to_string()])
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_malformed_share_is_rejected() {
        let err = parse_shares(&people(), &[PersonId::new(1)], &["Asha".to_string()]).unwrap_err();
        assert!(err.is_validation());
        assert!(parse_shares(&people(), &[PersonId::new(1)], &["Nobody=5".to_string()])
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_garbage_amount_counts_as_zero() {
        let strategy =
            parse_shares(&people(), &[PersonId::new(1)], &["Asha=abc".to_string()]).unwrap();
        let SplitStrategy::Custom(amounts) = strategy else {
            panic!("expected a custom split");
        };
        assert_eq!(amounts[&PersonId::new(1)], Money::zero());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_category(Some("transport")).unwrap(), Some(Category::Transport));
        assert!(parse_category(Some("rockets")).unwrap_err().is_validation());
        assert_eq!(parse_category(None).unwrap(), None);

        assert_eq!(
            parse_date("2025-06-02").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert!(parse_date("02/06/2025").unwrap_err().is_validation());

        assert_eq!(parse_expense_id("e-4").unwrap(), ExpenseId::new(4));
        assert!(parse_expense_id("lunch").unwrap_err().is_not_found());
    }
}
