//! Grocery list entity.

pub mod model;

pub use model::{
    GroceryList, GroceryListItem, GroceryListWithItems, ItemSource, ListItemPatch, ListStatus,
    NewListItem,
};
