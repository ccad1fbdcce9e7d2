//! Rendering of a balance report for the terminal.

use std::io::Write;

use api_types::balance::BalanceReportView;
use serde::Serialize;

use crate::error::Result;

fn name_of<'a>(view: &'a BalanceReportView, member: &'a str) -> &'a str {
    view.balances
        .iter()
        .find(|b| b.member == member)
        .map_or(member, |b| b.name.as_str())
}

pub fn write_table(out: &mut impl Write, view: &BalanceReportView) -> Result<()> {
    writeln!(
        out,
        "Balances ({}), total spent {}",
        view.currency,
        view.total_spent
    )?;
    let width = view
        .balances
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    writeln!(out, "  {:<width$}  {:>12}  {:>12}  {:>12}", "NAME", "PAID", "OWED", "NET")?;
    for balance in &view.balances {
        writeln!(
            out,
            "  {:<width$}  {:>12}  {:>12}  {:>12}",
            balance.name, balance.paid, balance.owed, balance.net
        )?;
    }

    writeln!(out)?;
    if view.settled {
        writeln!(out, "All settled up!")?;
        return Ok(());
    }
    writeln!(out, "Suggested transfers:")?;
    for step in &view.plan {
        writeln!(
            out,
            "  {} -> {}: {}",
            name_of(view, &step.from),
            name_of(view, &step.to),
            step.amount
        )?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, view: &BalanceReportView) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, view)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct PlanRow<'a> {
    from: &'a str,
    from_name: &'a str,
    to: &'a str,
    to_name: &'a str,
    amount: &'a str,
    amount_minor: i64,
}

pub fn write_csv(out: &mut impl Write, view: &BalanceReportView) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if view.plan.is_empty() {
        writer.write_record(["from", "from_name", "to", "to_name", "amount", "amount_minor"])?;
    }
    for step in &view.plan {
        writer.serialize(PlanRow {
            from: &step.from,
            from_name: name_of(view, &step.from),
            to: &step.to,
            to_name: name_of(view, &step.to),
            amount: &step.amount,
            amount_minor: step.amount_minor,
        })?;
    }
    writer.flush()?;
    Ok(())
}
