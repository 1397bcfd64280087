//! Text rendering of receipts for documents and email.

use ceiba_shared::CondominiumConfig;
use ceiba_shared::types::Money;
use rust_decimal::Decimal;

use super::view::{ReceiptView, SHARE_DECIMALS, round_to};
use crate::period::{BillingPeriod, month_name};

/// Formats an amount as printed on receipts, e.g. `USD1278.97`.
#[must_use]
pub fn format_amount(money: Money, decimal_places: u32) -> String {
    money.format(decimal_places)
}

/// Formats an ownership share, e.g. `1.6120%`.
#[must_use]
pub fn format_share(share: Decimal) -> String {
    format!("{}%", round_to(share, SHARE_DECIMALS))
}

/// File name of a unit's receipt document, e.g. `recibo-2A-Julio-2025.pdf`.
///
/// Characters outside `[A-Za-z0-9_-]` in the unit label become `-`.
#[must_use]
pub fn attachment_file_name(unit_label: &str, period: &BillingPeriod) -> String {
    let label: String = unit_label
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!(
        "recibo-{label}-{}-{}.pdf",
        month_name(period.month).unwrap_or("Mes"),
        period.year
    )
}

/// Subject line of a receipt email.
#[must_use]
pub fn email_subject(period: &BillingPeriod) -> String {
    format!("Recibo de Condominio: {}", period.label())
}

/// Plain-text body of a receipt email.
#[must_use]
pub fn email_body(
    view: &ReceiptView,
    period: &BillingPeriod,
    condominium: &CondominiumConfig,
    decimal_places: u32,
) -> String {
    let total = format_amount(
        Money::new(view.total_due, condominium.currency),
        decimal_places,
    );
    let mut body = format!(
        "Estimado(a) {owner},\n\n\
         Adjunto a este correo encontrará el recibo de gastos comunes \
         correspondiente al período de {month} de {year} para su inmueble {unit}.\n\n\
         El monto total a pagar es de {total}.\n\n\
         Por favor, revise el documento adjunto para ver el desglose completo de los gastos.\n\n\
         Atentamente,\n\
         La Administración de {name}\n",
        owner = view.owner_name,
        month = month_name(period.month).unwrap_or("?"),
        year = period.year,
        unit = view.unit_label,
        name = condominium.name,
    );
    if !condominium.address.is_empty() {
        body.push_str(&condominium.address);
        body.push('\n');
    }
    body
}
