use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::hurricane_alert::SeverityLevel;
use crate::dto::status::{HealthDto, ServiceStatusDto};
use crate::forms::hurricane_alerts::AddHurricaneAlertForm;
use crate::forms::products::AddProductForm;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::services::stocks::parse_symbols;
use crate::web::{
    ApiClient, DEFAULT_SYMBOLS, SERVICE_NAME, base_context, describe_error, redirect,
    render_template,
};

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|symbol| (*symbol).to_string()).collect()
}

#[get("/")]
pub async fn show_dashboard(
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "dashboard");
    let mut errors = Vec::new();

    match api.list_active_hurricane_alerts().await {
        Ok(alerts) => context.insert("active_alerts", &alerts),
        Err(err) => {
            log::error!("Failed to load active alerts: {err}");
            context.insert("active_alerts", &Vec::<()>::new());
            errors.push(describe_error(&err));
        }
    }

    match api.stock_prices(&default_symbols()).await {
        Ok(quotes) => context.insert("quotes", &quotes),
        Err(err) => {
            log::error!("Failed to load stock quotes: {err}");
            context.insert("quotes", &Vec::<()>::new());
            errors.push(describe_error(&err));
        }
    }

    context.insert("errors", &errors);
    render_template(&tera, "main/index.html", &context)
}

#[get("/health")]
pub async fn show_health() -> impl Responder {
    HttpResponse::Ok().json(HealthDto::healthy())
}

#[get("/status")]
pub async fn show_status() -> impl Responder {
    HttpResponse::Ok().json(ServiceStatusDto::running(SERVICE_NAME))
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductsPageQuery {
    pub page: Option<usize>,
}

#[get("/products")]
pub async fn show_products(
    params: web::Query<ProductsPageQuery>,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = params.page.unwrap_or(1).max(1);
    let mut context = base_context(&flash_messages, "products");

    match api.list_products(page, DEFAULT_PAGE_SIZE).await {
        Ok(data) => {
            context.insert("products", &data.products);
            context.insert("page", &data.page);
            context.insert("total_pages", &data.total_pages);
            context.insert("page_numbers", &(1..=data.total_pages).collect::<Vec<_>>());
            context.insert("total_count", &data.total_count);
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            context.insert("products", &Vec::<()>::new());
            context.insert("page", &page);
            context.insert("total_pages", &0);
            context.insert("page_numbers", &Vec::<usize>::new());
            context.insert("total_count", &0);
            context.insert("errors", &vec![describe_error(&err)]);
            render_template(&tera, "products/index.html", &context)
        }
    }
}

#[post("/products")]
pub async fn add_product(
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    let dto = match form.into_create_dto() {
        Ok(dto) => dto,
        Err(err) => {
            FlashMessage::error(format!("Product was not added: {err}")).send();
            return redirect("/products");
        }
    };

    match api.create_product(&dto).await {
        Ok(product) => {
            FlashMessage::success(format!("Product \"{}\" added.", product.name)).send();
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error(describe_error(&err)).send();
        }
    }
    redirect("/products")
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertsPageQuery {
    pub active: Option<bool>,
}

#[get("/alerts")]
pub async fn show_alerts(
    params: web::Query<AlertsPageQuery>,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "alerts");
    let active_filter = match params.active {
        None => "all",
        Some(true) => "active",
        Some(false) => "inactive",
    };
    context.insert("active_filter", active_filter);
    context.insert("severities", &SeverityLevel::ALL.map(SeverityLevel::as_str));

    match api.list_hurricane_alerts(params.active).await {
        Ok(alerts) => context.insert("hurricane_alerts", &alerts),
        Err(err) => {
            log::error!("Failed to list hurricane alerts: {err}");
            context.insert("hurricane_alerts", &Vec::<()>::new());
            context.insert("errors", &vec![describe_error(&err)]);
        }
    }

    render_template(&tera, "alerts/index.html", &context)
}

#[post("/alerts")]
pub async fn add_alert(
    api: web::Data<ApiClient>,
    web::Form(form): web::Form<AddHurricaneAlertForm>,
) -> impl Responder {
    let dto = match form.into_create_dto() {
        Ok(dto) => dto,
        Err(err) => {
            FlashMessage::error(format!("Alert was not created: {err}")).send();
            return redirect("/alerts");
        }
    };

    match api.create_hurricane_alert(&dto).await {
        Ok(alert) => {
            FlashMessage::success(format!("Alert for {} created.", alert.name)).send();
        }
        Err(err) => {
            log::error!("Failed to create hurricane alert: {err}");
            FlashMessage::error(describe_error(&err)).send();
        }
    }
    redirect("/alerts")
}

#[post("/alerts/{id}/deactivate")]
pub async fn deactivate_alert(id: web::Path<i32>, api: web::Data<ApiClient>) -> impl Responder {
    let id = id.into_inner();
    match api.deactivate_hurricane_alert(id).await {
        Ok(alert) => FlashMessage::success(format!("{} deactivated.", alert.name)).send(),
        Err(err) => {
            log::error!("Failed to deactivate hurricane alert {id}: {err}");
            FlashMessage::error(describe_error(&err)).send();
        }
    }
    redirect("/alerts")
}

#[post("/alerts/{id}/delete")]
pub async fn delete_alert(id: web::Path<i32>, api: web::Data<ApiClient>) -> impl Responder {
    let id = id.into_inner();
    match api.delete_hurricane_alert(id).await {
        Ok(()) => FlashMessage::success("Alert deleted.").send(),
        Err(err) => {
            log::error!("Failed to delete hurricane alert {id}: {err}");
            FlashMessage::error(describe_error(&err)).send();
        }
    }
    redirect("/alerts")
}

#[derive(Debug, Default, Deserialize)]
pub struct StocksPageQuery {
    pub symbols: Option<String>,
}

#[get("/stocks")]
pub async fn show_stocks(
    params: web::Query<StocksPageQuery>,
    api: web::Data<ApiClient>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "stocks");

    let symbols = match params.symbols.as_deref() {
        None => default_symbols(),
        Some(raw) => match parse_symbols(Some(raw)) {
            Ok(symbols) => symbols,
            Err(err) => {
                FlashMessage::warning(err.to_string()).send();
                return redirect("/stocks");
            }
        },
    };
    context.insert("symbols", &symbols.join(","));

    match api.stock_prices(&symbols).await {
        Ok(quotes) => context.insert("quotes", &quotes),
        Err(err) => {
            log::error!("Failed to load stock quotes: {err}");
            context.insert("quotes", &Vec::<()>::new());
            context.insert("errors", &vec![describe_error(&err)]);
        }
    }

    render_template(&tera, "stocks/index.html", &context)
}

/// Registers every page of the front end.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_dashboard)
        .service(show_health)
        .service(show_status)
        .service(show_products)
        .service(add_product)
        .service(show_alerts)
        .service(add_alert)
        .service(deactivate_alert)
        .service(delete_alert)
        .service(show_stocks);
}
