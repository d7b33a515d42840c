mod test_plane_fit;
mod test_shape_resample;
