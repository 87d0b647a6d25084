// --- File: crates/washbook_booking/src/view.rs ---
//! Server-rendered index page: the booking form and the list of bookings.

use washbook_common::models::Booking;
use washbook_config::BookingConfig;

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn options(values: &[String]) -> String {
    values.iter().fold(String::new(), |mut out, value| {
        let value = escape_html(value);
        out.push_str(&format!(r#"<option value="{0}">{0}</option>"#, value));
        out
    })
}

fn booking_rows(bookings: &[Booking], slot_format: &str) -> String {
    if bookings.is_empty() {
        return r#"<tr><td colspan="5">Nenhum agendamento.</td></tr>"#.to_string();
    }
    bookings.iter().fold(String::new(), |mut out, booking| {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&booking.slot_label(slot_format)),
            escape_html(&booking.client_name),
            escape_html(&booking.plate),
            escape_html(&booking.vehicle_type),
            escape_html(&booking.service),
        ));
        out
    })
}

/// Renders the index page for `bookings`, which are shown in the given order.
pub fn render_index(bookings: &[Booking], config: &BookingConfig) -> String {
    let shop_name = escape_html(&config.shop_name);
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{shop_name} - Agendamento</title>
</head>
<body>
<h1>{shop_name}</h1>
<form method="post" action="/">
<label>Nome <input type="text" name="cliente" required></label>
<label>Placa <input type="text" name="placa" required></label>
<label>Tipo de Veículo <select name="tipo_veiculo" required>{vehicle_types}</select></label>
<label>Serviço <select name="servico" required>{services}</select></label>
<label>Data e hora <input type="datetime-local" name="data_hora_input" required></label>
<button type="submit">Agendar</button>
</form>
<h2>Agendamentos</h2>
<table>
<thead><tr><th>Data/Hora</th><th>Cliente</th><th>Placa</th><th>Tipo de Veículo</th><th>Serviço</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</body>
</html>
"#,
        shop_name = shop_name,
        vehicle_types = options(&config.vehicle_types),
        services = options(&config.services),
        rows = booking_rows(bookings, &config.slot_format),
    )
}
