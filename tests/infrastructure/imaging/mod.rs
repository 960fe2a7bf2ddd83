mod image_crate_encoder_test;
