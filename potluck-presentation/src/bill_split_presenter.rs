use crate::text_table::{Alignment, TextTableBuilder};
use potluck_application::{BillSplit, Language};
use potluck_domain::Money;
use potluck_i18n::{self as i18n, Locale};
use std::{borrow::Cow, fmt::Write};

pub struct BillSplitPresenter;

impl BillSplitPresenter {
    /// Balance table, then one line per payment, in the event's language.
    pub fn render(split: &BillSplit<'_>) -> String {
        let locale = locale_for(split.language);
        let strings = i18n::strings(locale);

        let mut out = Self::build_balance_table(split, locale);

        if !split.unattributed.is_zero() {
            let _ = writeln!(
                out,
                "{}: {}",
                strings.unattributed,
                format_money(split.unattributed, split.scale)
            );
        }

        out.push('\n');
        out.push_str(&Self::build_transfer_lines(split, locale));
        out
    }

    /// Notice shown instead of a bill for events that carry no costs.
    pub fn render_costs_not_tracked(language: Language) -> String {
        format!("{}\n", i18n::strings(locale_for(language)).costs_not_tracked)
    }

    pub fn build_balance_table(split: &BillSplit<'_>, locale: Locale) -> String {
        let strings = i18n::strings(locale);
        let scale = split.scale;
        let headers = [
            Cow::Borrowed(strings.person),
            Cow::Borrowed(strings.paid),
            Cow::Borrowed(strings.owes),
            Cow::Borrowed(strings.balance),
        ];

        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&headers);

        for row in &split.rows {
            builder = builder.row([
                Cow::Borrowed(row.person),
                Cow::Owned(format_money(row.paid, scale)),
                Cow::Owned(format_money(row.owes, scale)),
                Cow::Owned(format_signed(row.balance, scale)),
            ]);
        }

        builder
            .footer([
                Cow::Borrowed(strings.total),
                Cow::Owned(format_money(split.totals.paid, scale)),
                Cow::Owned(format_money(split.totals.owes, scale)),
                Cow::Owned(format_signed(split.totals.balance, scale)),
            ])
            .build()
    }

    pub fn build_transfer_lines(split: &BillSplit<'_>, locale: Locale) -> String {
        let strings = i18n::strings(locale);
        if split.transfers.is_empty() {
            return format!("{}\n", strings.all_settled);
        }

        let mut out = format!("{}:\n", strings.transfers);
        for transfer in &split.transfers {
            let amount = format_money(transfer.amount, split.scale);
            let _ = writeln!(
                out,
                "  {}",
                i18n::payment_line(locale, transfer.from, transfer.to, &amount)
            );
        }
        out
    }
}

pub fn locale_for(language: Language) -> Locale {
    match language {
        Language::En => Locale::En,
        Language::Es => Locale::Es,
    }
}

fn format_money(amount: Money, scale: u32) -> String {
    format!("{:.*}", scale as usize, amount.as_decimal())
}

fn format_signed(amount: Money, scale: u32) -> String {
    let sign = if amount.is_positive() { "+" } else { "" };
    format!("{sign}{}", format_money(amount, scale))
}
