mod category_dto;

pub use category_dto::{
    AreaOverviewDto, CategoryEventCountDto, CategoryResponseDto, CreateCategoryDto,
};
