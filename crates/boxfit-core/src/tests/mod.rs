mod padding;
mod query;
