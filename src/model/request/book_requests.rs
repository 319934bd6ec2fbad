use rocket::form::FromForm;

/// query parameters for the explore filter. `include` and `exclude` are
/// comma-separated tag id lists; keeping them disjoint is the caller's job
#[derive(FromForm)]
pub struct ExploreParams {
    pub include: Option<String>,
    pub exclude: Option<String>,
    #[field(name = "yearFrom")]
    pub year_from: Option<i32>,
    #[field(name = "yearTo")]
    pub year_to: Option<i32>,
    pub sort: Option<String>,
}

/// query parameters for listing the books on a shelf
#[derive(FromForm)]
pub struct ShelfBooksParams {
    pub q: Option<String>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    #[field(name = "yearFrom")]
    pub year_from: Option<i32>,
    #[field(name = "yearTo")]
    pub year_to: Option<i32>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}
