#[api_description("Warehouse stock")]
pub struct Inventory {
    pub items: Vec<String>,
}
