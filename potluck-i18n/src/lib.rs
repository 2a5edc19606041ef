#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Es,
}

pub struct Strings {
    pub person: &'static str,
    pub paid: &'static str,
    pub owes: &'static str,
    pub balance: &'static str,
    pub total: &'static str,
    pub transfers: &'static str,
    pub all_settled: &'static str,
    pub unattributed: &'static str,
    pub costs_not_tracked: &'static str,
    pays: &'static str,
}

pub static EN: Strings = Strings {
    person: "Person",
    paid: "Paid",
    owes: "Owes",
    balance: "Balance",
    total: "Total",
    transfers: "Payments",
    all_settled: "Everyone is settled up.",
    unattributed: "Unclaimed costs (not split)",
    costs_not_tracked: "This event does not track costs.",
    pays: "pays",
};

pub static ES: Strings = Strings {
    person: "Persona",
    paid: "Pagado",
    owes: "Debe",
    balance: "Saldo",
    total: "Total",
    transfers: "Pagos",
    all_settled: "Todas las cuentas están saldadas.",
    unattributed: "Costos sin reclamar (no repartidos)",
    costs_not_tracked: "Este evento no registra costos.",
    pays: "paga a",
};

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::En => &EN,
        Locale::Es => &ES,
    }
}

pub struct PaymentLine<'a> {
    locale: Locale,
    from: &'a str,
    to: &'a str,
    amount: &'a str,
}

pub fn payment_line<'a>(
    locale: Locale,
    from: &'a str,
    to: &'a str,
    amount: &'a str,
) -> PaymentLine<'a> {
    PaymentLine {
        locale,
        from,
        to,
        amount,
    }
}

impl std::fmt::Display for PaymentLine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pays = strings(self.locale).pays;
        write!(f, "{} {pays} {}: {}", self.from, self.to, self.amount)
    }
}
