use actix_web::{HttpResponse, Responder, get, web};
use tokio_util::sync::CancellationToken;

use crate::dto::stocks::StockQuery;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::stocks::{self, MockStockPriceService, STOCKS_UNAVAILABLE};

/// Quotes for a comma separated list of symbols.
///
/// Generation runs on the blocking pool; if the client disconnects the
/// handler future is dropped, the guard cancels the token and the worker
/// stops at the next symbol.
#[get("/api/stocks")]
pub async fn get_stock_prices(
    params: web::Query<StockQuery>,
    provider: web::Data<MockStockPriceService>,
) -> impl Responder {
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let query = params.into_inner();
    let token = cancel.clone();
    let result =
        web::block(move || stocks::load_stock_prices(provider.get_ref(), query, &token)).await;

    match result {
        Ok(Ok(prices)) => HttpResponse::Ok().json(prices),
        Ok(Err(err)) => service_error_response(err, "load stock prices"),
        Err(err) => {
            log::error!("Stock price worker failed: {err}");
            service_error_response(
                ServiceError::Unavailable(STOCKS_UNAVAILABLE.to_string()),
                "load stock prices",
            )
        }
    }
}
