use super::query_structs::{Pagination, QueryPage};
use std::sync::Mutex;
use tally_domain::{Entity, ID};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    for item in collection.iter_mut() {
        if item.id() == val.id() {
            *item = val.clone();
        }
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut deleted_items = Vec::new();
    collection.retain(|item| {
        if compare(item) {
            deleted_items.push(item.clone());
            false
        } else {
            true
        }
    });
    deleted_items
}

/// Applies `pagination` to already filtered and sorted items
pub fn paginate<T>(items: Vec<T>, pagination: &Pagination) -> QueryPage<T> {
    let total = items.len();
    let items = items
        .into_iter()
        .skip(pagination.skip)
        .take(pagination.limit)
        .collect();
    QueryPage { items, total }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: ID,
        value: usize,
    }

    impl Entity for Item {
        fn id(&self) -> &ID {
            &self.id
        }
    }

    fn items(count: usize) -> Mutex<Vec<Item>> {
        Mutex::new(
            (0..count)
                .map(|value| Item {
                    id: ID::new(),
                    value,
                })
                .collect(),
        )
    }

    #[test]
    fn find_and_delete_by_keeps_order_of_the_rest() {
        let collection = items(6);
        let deleted = find_and_delete_by(&collection, |item| item.value % 2 == 0);
        assert_eq!(deleted.iter().map(|i| i.value).collect::<Vec<_>>(), vec![0, 2, 4]);
        let rest = find_by(&collection, |_| true);
        assert_eq!(rest.iter().map(|i| i.value).collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn save_replaces_by_id() {
        let collection = items(3);
        let mut item = find_by(&collection, |i| i.value == 1).remove(0);
        item.value = 10;
        save(&item, &collection);
        assert_eq!(find(&item.id, &collection), Some(item));
    }

    #[test]
    fn paginates() {
        let page = paginate((0..45).collect::<Vec<_>>(), &Pagination::page(3, 20));
        assert_eq!(page.total, 45);
        assert_eq!(page.items, (40..45).collect::<Vec<_>>());

        let page = paginate((0..5).collect::<Vec<_>>(), &Pagination::page(0, 2));
        assert_eq!(page.items, vec![0, 1]);
    }
}
