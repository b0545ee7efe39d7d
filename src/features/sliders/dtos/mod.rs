mod slider_dto;

pub use slider_dto::{CreateSliderDto, SliderResponseDto, UpdateSliderDto};
