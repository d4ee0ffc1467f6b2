use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    list: Vec<T>,
    total: i64,
}

impl<T> List<T> {
    pub fn new(list: Vec<T>) -> Self {
        let total = list.len() as i64;
        List { list, total }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(flatten)]
    data: T,
    total: i64,
}

impl<T> Page<T> {
    pub fn new(data: T, total: i64) -> Self {
        Page { data, total }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i32,
}
