mod cancellation;
mod integration;
mod tcp;
