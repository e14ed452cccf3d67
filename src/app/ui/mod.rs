mod controls;
mod details;
mod panels;
mod reference;
mod workflow;
