use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};

use crate::handlers::{parse_trtl, ConvertQuery};
use crate::AppState;

/// GET / - Landing page showing the value of `trtl` TRTL
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> (StatusCode, Html<String>) {
    let trtl = match parse_trtl(query.trtl.as_deref()) {
        Ok(trtl) => trtl,
        Err(e) => return error_page(&e.to_string()),
    };

    match state.converter.convert(trtl, false).await {
        Ok(price) => (
            StatusCode::OK,
            Html(format!(
                "<!DOCTYPE html>\n<html>\n<head><title>TurtleCoin price</title></head>\n<body>\n\
                 <h1>{} TRTL</h1>\n<p class=\"usd\">{}</p>\n<p class=\"btc\">{}</p>\n</body>\n</html>\n",
                trtl,
                price.usd_display(),
                price.btc_display()
            )),
        ),
        Err(e) => {
            tracing::error!("Landing page conversion failed: {}", e);
            error_page(&e.to_string())
        }
    }
}

fn error_page(message: &str) -> (StatusCode, Html<String>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Error</title></head>\n<body>\n\
             <h1>Something went wrong</h1>\n<p>{}</p>\n</body>\n</html>\n",
            escape_html(message)
        )),
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
