mod helpers;
mod test_http;
