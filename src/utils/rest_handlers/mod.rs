pub mod download_result_handler;
pub mod rest_responses;
pub mod static_page_handler;
pub mod upload_convert_handler;

#[cfg(test)]
mod download_result_handler_tests;



#[cfg(test)]
mod upload_convert_handler_tests;
