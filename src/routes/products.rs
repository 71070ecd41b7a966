use actix_web::http::header;
use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::products::CreateProductDto;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::products;

#[get("/api/products")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(err, "list products"),
    }
}

#[get("/api/products/{id}")]
pub async fn get_product(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => service_error_response(err, "load product"),
    }
}

#[post("/api/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<CreateProductDto>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), dto) {
        Ok(product) => HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/api/products/{}", product.id)))
            .json(product),
        Err(err) => service_error_response(err, "create product"),
    }
}
