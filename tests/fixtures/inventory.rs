// Inventory fixture - overloads and bounds, implemented apart from the type item
use crate::model::Inventory;

impl Inventory {
    #[api_method]
    #[api_description("counts every item")]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[api_method]
    #[api_description("counts items of one kind")]
    pub fn count(&self, kind: String) -> usize {
        0
    }

    #[api_method]
    #[api_return(description = "units after restocking", required, max = 500)]
    pub fn restock(
        &mut self,
        #[api_description("item kind")] kind: String,
        #[api_int_validation(min = 1, max = 100)] units: u32,
        #[api_int_validation(max = 10)] #[api_required(false)] priority: u8,
    ) -> u32 {
        units
    }
}
