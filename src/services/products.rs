use serde::Deserialize;

use crate::domain::product::ProductListQuery;
use crate::dto::products::{CreateProductDto, ProductDto, ProductPageDto};
use crate::pagination::{DEFAULT_PAGE_SIZE, Pagination};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsQuery {
    /// 1-based page number, defaults to 1.
    pub page: Option<i64>,
    /// Rows per page, defaults to [`DEFAULT_PAGE_SIZE`].
    pub page_size: Option<i64>,
}

impl ProductsQuery {
    fn pagination(&self) -> ServiceResult<Pagination> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(ServiceError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64);
        if page_size < 1 {
            return Err(ServiceError::Validation(
                "pageSize must be greater than or equal to 1".to_string(),
            ));
        }

        if (page - 1).checked_mul(page_size).is_none() {
            return Err(page_out_of_range());
        }

        let page = usize::try_from(page).map_err(|_| page_out_of_range())?;
        let page_size = usize::try_from(page_size).map_err(|_| page_out_of_range())?;

        Ok(Pagination::new(page, page_size))
    }
}

fn page_out_of_range() -> ServiceError {
    ServiceError::Validation("page is out of range for the requested pageSize".to_string())
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Product with ID {id} not found"))
}

/// Loads one page of products ordered by id.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<ProductPageDto>
where
    R: ProductReader + ?Sized,
{
    let pagination = query.pagination()?;
    let list_query = ProductListQuery::new().paginate(pagination.page, pagination.per_page);

    let (total, products) = repo.list_products(list_query)?;

    Ok(ProductPageDto {
        products: products.into_iter().map(ProductDto::from).collect(),
        page: pagination.page,
        page_size: pagination.per_page,
        total_count: total,
        total_pages: pagination.total_pages(total),
    })
}

/// Loads a single product.
pub fn get_product<R>(repo: &R, id: i32) -> ServiceResult<ProductDto>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(id)?
        .map(ProductDto::from)
        .ok_or_else(|| not_found(id))
}

/// Stores a new product stamped with the server time.
pub fn create_product<R>(repo: &R, dto: CreateProductDto) -> ServiceResult<ProductDto>
where
    R: ProductWriter + ?Sized,
{
    let new_product = dto
        .into_new_product()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let product = repo.create_product(&new_product)?;
    log::info!("Created product {} ({})", product.id, product.name);

    Ok(product.into())
}
