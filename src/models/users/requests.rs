// 存储层使用的账号请求，password 字段存放已哈希的密码

// 创建账号
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

// 更新账号
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub status: Option<super::entities::UserStatus>,
}
