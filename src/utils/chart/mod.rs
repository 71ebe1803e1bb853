pub mod chart_render;
