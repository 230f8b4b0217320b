//! Walks one exchange through a canned transfer: prepare the request, then parse what a
//! transport would have received.

use bytes::Bytes;
use micro_message::exchange::{CallOptions, Exchange, TransferInfo};
use micro_message::protocol::{HttpMessage, MessageError};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const RAW_OUTPUT: &[u8] = b"HTTP/1.1 200 OK\r\n\
Content-Type: application/json\r\n\
Set-Cookie: session=abc123; Path=/; HttpOnly\r\n\
Set-Cookie: theme=dark\r\n\
\r\n\
{\"users\":[]}";

fn main() -> Result<(), MessageError> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut exchange = Exchange::from_notation("get >> api.example.com/users")?;
    exchange.request_mut().set_header("Accept", "application/json")?;

    let outbound = exchange.get(CallOptions::new().param("page", 2).cookie("locale", "en"))?;
    info!(url = %outbound.url, method = %outbound.method, "outbound request");
    for line in &outbound.header_lines {
        info!(line = %line, "outbound header");
    }

    let response = exchange.complete(Bytes::from_static(RAW_OUTPUT), &TransferInfo::default());
    info!(
        status = ?response.status(),
        code = response.status_code(),
        text = response.status_text(),
        "inbound status"
    );
    for (key, value) in response.headers().wire() {
        info!(key, value = ?value, "inbound header");
    }
    for (name, value) in response.cookies() {
        info!(name = %name, value = %value, "inbound cookie");
    }

    println!("{response}");
    Ok(())
}
