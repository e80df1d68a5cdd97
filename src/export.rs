pub mod mask_png;
