use core_types::Product;

/// Screen navigation owned by the UI layer.
pub trait Navigator {
    fn show_detail(&self, product: &Product);
}
